//! Row mapping shared by the MySQL repositories

use sf_core::domain::entities::{Address, Author, Book, Category, Comment, Product, ProfileImage, User};
use sf_core::errors::DomainError;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlConnection, QueryBuilder, Row};

use crate::database::errors::db_err;

pub(crate) const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.price_in_pln_gr, p.is_in_stock, p.description, p.upvotes, p.user_id";

pub(crate) const USER_COLUMNS: &str = "u.id, u.email, u.name, u.password, u.phone_number, \
     u.address_id, u.profile_image_id, a.street, a.city, a.country";

/// Read one column, naming it in the error
fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn row_to_category(row: &MySqlRow) -> Result<Category, DomainError> {
    Ok(Category {
        id: column(row, "id")?,
        name: column(row, "name")?,
    })
}

pub(crate) fn row_to_product(row: &MySqlRow) -> Result<Product, DomainError> {
    Ok(Product {
        id: column(row, "id")?,
        name: column(row, "name")?,
        price_in_pln_gr: column(row, "price_in_pln_gr")?,
        is_in_stock: column(row, "is_in_stock")?,
        description: column(row, "description")?,
        upvotes: column(row, "upvotes")?,
        user_id: column(row, "user_id")?,
    })
}

/// Map a row selected with [`USER_COLUMNS`]
pub(crate) fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
    let address_id: Option<i32> = column(row, "address_id")?;
    let address = match address_id {
        Some(id) => {
            let street: Option<String> = column(row, "street")?;
            let city: Option<String> = column(row, "city")?;
            let country: Option<String> = column(row, "country")?;
            match (street, city, country) {
                (Some(street), Some(city), Some(country)) => Some(Address {
                    id,
                    street,
                    city,
                    country,
                }),
                _ => None,
            }
        }
        None => None,
    };

    Ok(User {
        id: column(row, "id")?,
        email: column(row, "email")?,
        name: column(row, "name")?,
        password: column(row, "password")?,
        phone_number: column(row, "phone_number")?,
        address_id,
        address,
        profile_image_id: column(row, "profile_image_id")?,
    })
}

pub(crate) fn row_to_comment(row: &MySqlRow) -> Result<Comment, DomainError> {
    Ok(Comment {
        id: column(row, "id")?,
        text: column(row, "text")?,
        user_id: column(row, "user_id")?,
    })
}

pub(crate) fn row_to_author(row: &MySqlRow) -> Result<Author, DomainError> {
    Ok(Author {
        id: column(row, "id")?,
        name: column(row, "name")?,
    })
}

pub(crate) fn row_to_book(row: &MySqlRow) -> Result<Book, DomainError> {
    Ok(Book {
        id: column(row, "id")?,
        title: column(row, "title")?,
        price_in_pln_gr: column(row, "price_in_pln_gr")?,
    })
}

pub(crate) fn row_to_profile_image(row: &MySqlRow) -> Result<ProfileImage, DomainError> {
    Ok(ProfileImage {
        id: column(row, "id")?,
        url: column(row, "url")?,
    })
}

pub(crate) fn map_rows<T>(
    rows: &[MySqlRow],
    map: fn(&MySqlRow) -> Result<T, DomainError>,
) -> Result<Vec<T>, DomainError> {
    rows.iter().map(map).collect()
}

/// Convert `LAST_INSERT_ID()` into a row id
pub(crate) fn inserted_id(last_insert_id: u64) -> Result<i32, DomainError> {
    i32::try_from(last_insert_id)
        .map_err(|_| DomainError::internal(format!("Id {} out of range", last_insert_id)))
}

/// Append `(?, ?, ...)` binding every id; callers skip empty lists
pub(crate) fn push_id_list(builder: &mut QueryBuilder<'_, MySql>, ids: &[i32]) {
    builder.push("(");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

/// Products linked to a category, ordered by id
pub(crate) async fn products_of_category(
    conn: &mut MySqlConnection,
    category_id: i32,
) -> Result<Vec<Product>, DomainError> {
    let query = format!(
        "SELECT {} FROM products p \
         JOIN category_products cp ON cp.product_id = p.id \
         WHERE cp.category_id = ? ORDER BY p.id",
        PRODUCT_COLUMNS
    );
    let rows = sqlx::query(&query)
        .bind(category_id)
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to load category products"))?;
    map_rows(&rows, row_to_product)
}

/// Link every id in `product_ids` to the category, keeping existing links
pub(crate) async fn link_products(
    conn: &mut MySqlConnection,
    category_id: i32,
    product_ids: &[i32],
) -> Result<(), DomainError> {
    if product_ids.is_empty() {
        return Ok(());
    }
    let mut builder: QueryBuilder<'_, MySql> =
        QueryBuilder::new("INSERT INTO category_products (category_id, product_id) ");
    builder.push_values(product_ids, |mut b, product_id| {
        b.push_bind(category_id).push_bind(*product_id);
    });
    builder.push(" ON DUPLICATE KEY UPDATE product_id = VALUES(product_id)");
    builder
        .build()
        .execute(conn)
        .await
        .map_err(db_err("Failed to link products"))?;
    Ok(())
}
