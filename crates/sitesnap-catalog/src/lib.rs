//! Catalog of companies, their web pages and the industries they belong to.
//!
//! This crate holds the data model shared by every other sitesnap crate, plus the pure logic
//! that turns a company snapshot into what the site renders:
//! - the slug codec used for every route and query parameter
//! - industry and webpage-group projections
//! - listing pagination
//! - the gallery carousel controller behind the full-screen viewer

#![warn(missing_docs)]

pub mod carousel;
pub mod catalog;
mod error;
mod model;
pub mod pagination;
pub mod slug;
#[cfg(test)]
mod test_support;

pub use carousel::{Carousel, CarouselItem, GalleryScope, Key, Navigation, ViewerParams};
pub use catalog::{
    distinct_industry_slugs, distinct_page_slugs, find_company, find_industry,
    find_webpage_group, industries, webpage_groups,
};
pub use error::CatalogError;
pub use model::{Company, Industry, Page, WebpageGroup};
pub use pagination::{PageLink, PageWindow, Paginator, page_from_query};
pub use slug::{capitalize_first, slugify, unslugify};
