/// Built-in sample data, used when no catalog or review file is configured.
use crate::catalog::{Catalog, Product};
use crate::review::{Review, ReviewBook};

struct Row {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    price: f64,
    rating: f64,
    reviews: u32,
    description: &'static str,
    tags: &'static [&'static str],
}

const ROWS: [Row; 8] = [
    Row {
        id: "1",
        name: "Premium Wireless Headphones",
        category: "Electronics",
        price: 199.99,
        rating: 4.8,
        reviews: 120,
        description: "Over-ear headphones with active noise cancellation and 30 hour battery life.",
        tags: &["audio", "wireless", "noise cancelling"],
    },
    Row {
        id: "2",
        name: "Smart Fitness Watch",
        category: "Electronics",
        price: 149.99,
        rating: 4.5,
        reviews: 85,
        description: "Tracks heart rate, sleep and workouts with a week of battery.",
        tags: &["fitness", "wearable", "health"],
    },
    Row {
        id: "3",
        name: "Casual Cotton T-Shirt",
        category: "Clothing",
        price: 24.99,
        rating: 4.3,
        reviews: 210,
        description: "Soft crew neck tee in breathable organic cotton.",
        tags: &["cotton", "casual", "basics"],
    },
    Row {
        id: "4",
        name: "Ergonomic Office Chair",
        category: "Home Goods",
        price: 249.99,
        rating: 4.6,
        reviews: 64,
        description: "Adjustable lumbar support and breathable mesh back for long work days.",
        tags: &["office", "furniture", "ergonomic"],
    },
    Row {
        id: "5",
        name: "Bestselling Novel",
        category: "Books",
        price: 14.99,
        rating: 4.7,
        reviews: 342,
        description: "The award-winning mystery everyone is talking about.",
        tags: &["fiction", "mystery", "paperback"],
    },
    Row {
        id: "6",
        name: "Professional DSLR Camera",
        category: "Electronics",
        price: 899.99,
        rating: 4.9,
        reviews: 47,
        description: "24MP full-frame sensor with 4K video and weather sealing.",
        tags: &["camera", "photography", "video"],
    },
    Row {
        id: "7",
        name: "Designer Handbag",
        category: "Clothing",
        price: 349.99,
        rating: 4.4,
        reviews: 38,
        description: "Italian leather tote with gold-tone hardware.",
        tags: &["leather", "accessories", "luxury"],
    },
    Row {
        id: "8",
        name: "Stainless Steel Water Bottle",
        category: "Home Goods",
        price: 19.99,
        rating: 4.2,
        reviews: 156,
        description: "Double-walled bottle that keeps drinks cold for 24 hours.",
        tags: &["hydration", "outdoor", "kitchen"],
    },
];

pub fn sample_products() -> Vec<Product> {
    ROWS.iter()
        .map(|row| Product {
            id: row.id.to_string(),
            name: row.name.to_string(),
            category: row.category.to_string(),
            price: row.price,
            rating: Some(row.rating),
            reviews: Some(row.reviews),
            description: Some(row.description.to_string()),
            tags: row.tags.iter().map(|t| t.to_string()).collect(),
            related_product_ids: Vec::new(),
        })
        .collect()
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_products()).unwrap_or_default()
}

fn review(id: &str, product_id: &str, rating: u8, comment: &str, timestamp: &str) -> Review {
    Review {
        id: id.to_string(),
        product_id: product_id.to_string(),
        rating,
        comment: comment.to_string(),
        timestamp: Some(timestamp.to_string()),
    }
}

pub fn sample_reviews() -> ReviewBook {
    let reviews = vec![
        review("r1", "1", 5, "Absolutely love these headphones! Amazing sound quality.", "2023-10-01T10:00:00Z"),
        review("r2", "1", 4, "Very good, noise cancellation is effective.", "2023-10-02T14:30:00Z"),
        review("r3", "1", 3, "Decent for the price, but expected a bit more.", "2023-10-03T09:15:00Z"),
        review("r4", "2", 4, "Nice watch, the battery lasts all week.", "2023-10-04T08:00:00Z"),
        review("r5", "2", 2, "Disappointed with the heart rate accuracy.", "2023-10-05T19:45:00Z"),
        review("r6", "3", 5, "Perfect fit and great fabric.", "2023-10-06T12:10:00Z"),
        review("r7", "3", 1, "Terrible stitching, fell apart after one wash.", "2023-10-07T16:20:00Z"),
    ];
    ReviewBook::new(reviews).unwrap_or_default()
}
