//! Static legal blog.

use std::time::Instant;

use axum::extract::{Path, Query};

use legalconnect_types::blog::{
    ALL_CATEGORIES, Article, ArticleDetail, filter_articles, find_article,
};
use legalconnect_types::error::MarketplaceError;

use crate::http::extractors::query::BlogQuery;
use crate::http::response::{ApiResult, ok};

/// GET /api/v1/blog?search=&category=
pub async fn list_articles(Query(query): Query<BlogQuery>) -> ApiResult<Vec<&'static Article>> {
    let start = Instant::now();
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    Ok(ok(filter_articles(&query.search, category), start))
}

/// GET /api/v1/blog/{id} - The article with its full markdown body.
pub async fn get_article(Path(id): Path<u32>) -> ApiResult<ArticleDetail> {
    let start = Instant::now();
    let article = find_article(id).ok_or(MarketplaceError::NotFound("article"))?;
    Ok(ok(ArticleDetail::from(article), start))
}
