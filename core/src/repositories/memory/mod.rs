//! In-memory implementation of every repository port.
//!
//! Available to this crate's tests and, through the `test-support` feature, to
//! downstream test suites. All repositories share one [`State`] behind an async
//! mutex; a category transaction holds that mutex for its whole lifetime and
//! works on a private copy that replaces the shared state on commit.

mod repositories;
mod transaction;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entities::{
    Address, Author, Book, BookWithAuthors, Category, CategoryWithProducts, Comment, Product,
    ProfileImage, User,
};

pub use transaction::InMemoryCategoryTransaction;

/// Tables of the in-memory store
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    sequences: HashMap<&'static str, i32>,
    pub(crate) users: BTreeMap<i32, User>,
    pub(crate) addresses: BTreeMap<i32, Address>,
    pub(crate) categories: BTreeMap<i32, Category>,
    pub(crate) products: BTreeMap<i32, Product>,
    /// (category_id, product_id)
    pub(crate) category_products: BTreeSet<(i32, i32)>,
    pub(crate) comments: BTreeMap<i32, Comment>,
    pub(crate) authors: BTreeMap<i32, Author>,
    pub(crate) books: BTreeMap<i32, Book>,
    /// (book_id, author_id)
    pub(crate) book_authors: BTreeSet<(i32, i32)>,
    pub(crate) profile_images: BTreeMap<i32, ProfileImage>,
    /// Category ids whose deletion fails inside a transaction
    pub(crate) failing_category_deletes: BTreeSet<i32>,
}

impl State {
    pub(crate) fn next_id(&mut self, table: &'static str) -> i32 {
        let sequence = self.sequences.entry(table).or_insert(0);
        *sequence += 1;
        *sequence
    }

    fn reserve_id(&mut self, table: &'static str, id: i32) {
        let sequence = self.sequences.entry(table).or_insert(0);
        *sequence = (*sequence).max(id);
    }

    pub(crate) fn user_with_address(&self, id: i32) -> Option<User> {
        let mut user = self.users.get(&id)?.clone();
        user.address = user
            .address_id
            .and_then(|address_id| self.addresses.get(&address_id).cloned());
        Some(user)
    }

    pub(crate) fn category_with_products(&self, id: i32) -> Option<CategoryWithProducts> {
        let category = self.categories.get(&id)?.clone();
        let products = self
            .category_products
            .range((id, i32::MIN)..=(id, i32::MAX))
            .filter_map(|(_, product_id)| self.products.get(product_id).cloned())
            .collect();
        Some(CategoryWithProducts { category, products })
    }

    pub(crate) fn categories_of(&self, product_id: i32) -> Vec<Category> {
        self.category_products
            .iter()
            .filter(|(_, linked)| *linked == product_id)
            .filter_map(|(category_id, _)| self.categories.get(category_id).cloned())
            .collect()
    }

    pub(crate) fn book_with_authors(&self, id: i32) -> Option<BookWithAuthors> {
        let book = self.books.get(&id)?.clone();
        let authors = self
            .book_authors
            .range((id, i32::MIN)..=(id, i32::MAX))
            .filter_map(|(_, author_id)| self.authors.get(author_id).cloned())
            .collect();
        Some(BookWithAuthors { book, authors })
    }

    /// Delete products together with their category links
    pub(crate) fn remove_products(&mut self, product_ids: &[i32]) -> u64 {
        let mut removed = 0;
        for id in product_ids {
            if self.products.remove(id).is_some() {
                removed += 1;
            }
        }
        self.category_products
            .retain(|(_, product_id)| !product_ids.contains(product_id));
        removed
    }
}

/// Shared in-memory store; cloning yields another handle to the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user whose password is already hashed
    pub async fn seed_user(&self, email: &str, name: &str, password_hash: &str) -> User {
        let mut state = self.state.lock().await;
        let id = state.next_id("users");
        let user = User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            password: password_hash.to_string(),
            phone_number: None,
            address_id: None,
            address: None,
            profile_image_id: None,
        };
        state.users.insert(id, user.clone());
        user
    }

    pub async fn seed_category(&self, name: &str) -> Category {
        let mut state = self.state.lock().await;
        let id = state.next_id("categories");
        let category = Category::new(id, name);
        state.categories.insert(id, category.clone());
        category
    }

    /// Insert a category under a fixed id
    pub async fn seed_category_with_id(&self, id: i32, name: &str) -> Category {
        let mut state = self.state.lock().await;
        state.reserve_id("categories", id);
        let category = Category::new(id, name);
        state.categories.insert(id, category.clone());
        category
    }

    pub async fn seed_product(&self, name: &str, user_id: i32, category_ids: &[i32]) -> Product {
        let mut state = self.state.lock().await;
        let id = state.next_id("products");
        let product = Product {
            id,
            name: name.to_string(),
            price_in_pln_gr: 1000,
            is_in_stock: true,
            description: format!("{} description", name),
            upvotes: 0,
            user_id,
        };
        state.products.insert(id, product.clone());
        for category_id in category_ids {
            state.category_products.insert((*category_id, id));
        }
        product
    }

    pub async fn seed_author(&self, name: &str) -> Author {
        let mut state = self.state.lock().await;
        let id = state.next_id("authors");
        let author = Author {
            id,
            name: name.to_string(),
        };
        state.authors.insert(id, author.clone());
        author
    }

    pub async fn seed_comment(&self, user_id: i32, text: &str) -> Comment {
        let mut state = self.state.lock().await;
        let id = state.next_id("comments");
        let comment = Comment {
            id,
            text: text.to_string(),
            user_id,
        };
        state.comments.insert(id, comment.clone());
        comment
    }

    /// Make any transactional delete of category `id` fail
    pub async fn fail_category_delete(&self, id: i32) {
        self.state.lock().await.failing_category_deletes.insert(id);
    }

    /// Snapshot of all categories ordered by id
    pub async fn categories(&self) -> Vec<Category> {
        self.state.lock().await.categories.values().cloned().collect()
    }

    /// Ids of the products linked to a category, ascending
    pub async fn product_ids_of(&self, category_id: i32) -> Vec<i32> {
        self.state
            .lock()
            .await
            .category_with_products(category_id)
            .map(|category| category.product_ids())
            .unwrap_or_default()
    }

    pub async fn product_exists(&self, id: i32) -> bool {
        self.state.lock().await.products.contains_key(&id)
    }

    pub async fn product_count(&self) -> usize {
        self.state.lock().await.products.len()
    }

    pub async fn owner_of(&self, product_id: i32) -> Option<i32> {
        self.state
            .lock()
            .await
            .products
            .get(&product_id)
            .map(|product| product.user_id)
    }
}
