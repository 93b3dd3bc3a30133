//! Static product definitions loaded at process start.

use crate::model::Product;

fn product(
    id: &str,
    name: &str,
    category: &str,
    price: f64,
    stock: u32,
    description: &str,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price,
        stock,
        description: description.to_string(),
    }
}

/// The built-in catalog, in catalog order
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "iPhone 15 Pro",
            "Electronics",
            999.99,
            50,
            "Latest iPhone with titanium design",
        ),
        product(
            "2",
            "MacBook Air M3",
            "Electronics",
            1299.99,
            25,
            "Lightweight laptop with M3 chip",
        ),
        product(
            "3",
            "Nike Air Max",
            "Footwear",
            129.99,
            100,
            "Classic running shoes",
        ),
        product(
            "4",
            "Coffee Maker Pro",
            "Appliances",
            199.99,
            15,
            "Professional grade coffee maker",
        ),
    ]
}
