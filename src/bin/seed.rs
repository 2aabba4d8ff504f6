//! Resets the orders table and fills it with 50 random rows. Seeded data
//! intentionally includes the legacy "cancelled" status, which the write
//! endpoints reject but the list filter accepts.

use chrono::{Duration, SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use orders_api::config::Config;
use orders_api::database::{create_pool, init_schema};

const STATUSES: [&str; 4] = ["pending", "shipped", "delivered", "cancelled"];
const ITEMS: [&str; 6] = [
    "Wireless Mouse",
    "Gaming Keyboard",
    "USB-C Cable",
    "Monitor Stand",
    "Webcam",
    "Headphones",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_toml()?;
    let pool = create_pool(&config.database).await?;

    sqlx::query("DROP TABLE IF EXISTS orders")
        .execute(&pool)
        .await?;
    init_schema(&pool).await?;
    log::info!("Table \"orders\" created/reset");

    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let item = ITEMS.choose(&mut rng).unwrap();
        let amount = (rng.gen_range(10.0..500.0) * 100.0_f64).round() / 100.0;
        let status = STATUSES.choose(&mut rng).unwrap();
        let date_created = (Utc::now() - Duration::days(rng.gen_range(0..=30)))
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        sqlx::query(
            "INSERT INTO orders (item_name, amount, status, date_created) VALUES (?, ?, ?, ?)",
        )
        .bind(*item)
        .bind(amount)
        .bind(*status)
        .bind(&date_created)
        .execute(&pool)
        .await?;
    }

    log::info!("Seeding complete. 50 orders inserted");
    Ok(())
}
