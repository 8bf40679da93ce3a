//! Schema creation for the catalog tables
//!
//! Every statement is `IF NOT EXISTS`, so running this on an existing
//! database is a no-op. A pre-existing `customers` table that still stores
//! plain `password` text is refused rather than silently reused.

use sqlx::SqlitePool;

use super::DbError;

/// Create all catalog tables and indexes.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manufacturers (
            manufacturer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            manufacturer_id INTEGER
                REFERENCES manufacturers(manufacturer_id) ON DELETE SET NULL ON UPDATE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL CHECK (price >= 0),
            stock_quantity INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL
                REFERENCES products(product_id) ON DELETE CASCADE ON UPDATE CASCADE,
            category_id INTEGER NOT NULL
                REFERENCES categories(category_id) ON DELETE CASCADE ON UPDATE CASCADE,
            UNIQUE (product_id, category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            address TEXT,
            password_hash TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
            order_date DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Order lines keep their product: deleting an ordered product is refused.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders_products (
            order_product_id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(order_id) ON DELETE CASCADE,
            product_id INTEGER NOT NULL REFERENCES products(product_id),
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL
                REFERENCES products(product_id) ON DELETE CASCADE ON UPDATE CASCADE,
            customer_id INTEGER NOT NULL REFERENCES customers(customer_id),
            rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
            comment TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    check_customer_credentials(pool).await?;
    create_indexes(pool).await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}

/// `CREATE TABLE IF NOT EXISTS` keeps an older `customers` table as it is;
/// inserts need the `password_hash` column.
async fn check_customer_credentials(pool: &SqlitePool) -> Result<(), DbError> {
    let (has_hash,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pragma_table_info('customers') WHERE name = 'password_hash'",
    )
    .fetch_one(pool)
    .await?;

    if has_hash == 0 {
        tracing::error!("customers table has no password_hash column");
        return Err(DbError::IncompatibleSchema(
            "customers table has no password_hash column; \
             the database was created by another application, use a new database file"
                .to_string(),
        ));
    }

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_products_categories_product ON products_categories(product_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_products_categories_category ON products_categories(category_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders(customer_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_orders_products_order ON orders_products(order_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_product ON reviews(product_id)")
        .execute(pool)
        .await?;

    Ok(())
}
