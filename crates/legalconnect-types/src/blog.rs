//! Static legal blog catalog.
//!
//! Listings carry only the teaser in `content`. The long-form markdown of
//! the published articles lives under `content/blog/` and is served by the
//! detail view.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: u32,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub content: &'static str,
    /// Full markdown article, when one is published.
    #[serde(skip)]
    pub body: Option<&'static str>,
    pub category: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub read_time: &'static str,
    pub image: &'static str,
}

/// Category filter value that matches every article.
pub const ALL_CATEGORIES: &str = "All";

pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Property Documentation",
    "Boundary Issues",
    "Documentation",
    "Property Rights",
    "Land Acquisition",
    "Inheritance",
];

pub const ARTICLES: [Article; 6] = [
    Article {
        id: 1,
        title: "Understanding Property Title Verification in India",
        excerpt: "A comprehensive guide to verifying property titles, checking encumbrances, and ensuring clear ownership before purchase.",
        content: "Property title verification is crucial before any real estate transaction. Here's what you need to know...",
        body: Some(include_str!("../content/blog/article-1.md")),
        category: "Property Documentation",
        author: "Legal Team",
        date: "2024-01-15",
        read_time: "8 min read",
        image: "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=400",
    },
    Article {
        id: 2,
        title: "Common Land Boundary Disputes and How to Resolve Them",
        excerpt: "Learn about the most frequent types of boundary disputes between neighbors and the legal remedies available.",
        content: "Boundary disputes are among the most common land-related legal issues in India...",
        body: Some(include_str!("../content/blog/article-2.md")),
        category: "Boundary Issues",
        author: "Legal Team",
        date: "2024-01-12",
        read_time: "6 min read",
        image: "https://images.unsplash.com/photo-1582407947304-fd86f028f716?w=400",
    },
    Article {
        id: 3,
        title: "Essential Documents for Land Purchase in India",
        excerpt: "Complete checklist of documents required for buying agricultural land, residential plots, and commercial properties.",
        content: "When purchasing land in India, having the right documents is essential for a smooth transaction...",
        body: Some(include_str!("../content/blog/article-3.md")),
        category: "Documentation",
        author: "Legal Team",
        date: "2024-01-10",
        read_time: "10 min read",
        image: "https://images.unsplash.com/photo-1450101499163-c8848c66ca85?w=400",
    },
    Article {
        id: 4,
        title: "Rights of Way and Easement Laws in Property Disputes",
        excerpt: "Understanding easement rights, rights of way, and how they affect property ownership and usage.",
        content: "Easement rights and rights of way are important aspects of property law that can significantly impact...",
        body: None,
        category: "Property Rights",
        author: "Legal Team",
        date: "2024-01-08",
        read_time: "7 min read",
        image: "https://images.unsplash.com/photo-1589829545856-d10d557cf95f?w=400",
    },
    Article {
        id: 5,
        title: "Land Acquisition Laws: Rights of Property Owners",
        excerpt: "Know your rights when the government acquires private land for public projects and fair compensation procedures.",
        content: "Land acquisition by the government is a complex legal process that affects many property owners...",
        body: None,
        category: "Land Acquisition",
        author: "Legal Team",
        date: "2024-01-05",
        read_time: "12 min read",
        image: "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?w=400",
    },
    Article {
        id: 6,
        title: "Property Inheritance Laws and Succession Rights",
        excerpt: "Complete guide to property inheritance, succession certificates, and legal procedures for transferring inherited land.",
        content: "Property inheritance in India follows specific legal procedures that vary by religion and local laws...",
        body: None,
        category: "Inheritance",
        author: "Legal Team",
        date: "2024-01-03",
        read_time: "9 min read",
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400",
    },
];

/// Articles whose title or excerpt contains `search` (case-insensitive) and
/// whose category equals `category`, unless it is [`ALL_CATEGORIES`].
pub fn filter_articles(search: &str, category: &str) -> Vec<&'static Article> {
    let needle = search.to_lowercase();
    ARTICLES
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&needle) || a.excerpt.to_lowercase().contains(&needle)
        })
        .filter(|a| category == ALL_CATEGORIES || a.category == category)
        .collect()
}

pub fn find_article(id: u32) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.id == id)
}

/// An article as shown on its own page.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: &'static Article,
    /// Markdown body. Falls back to the teaser for unpublished articles.
    pub body: &'static str,
}

impl From<&'static Article> for ArticleDetail {
    fn from(article: &'static Article) -> Self {
        Self {
            article,
            body: article.body.unwrap_or(article.content),
        }
    }
}
