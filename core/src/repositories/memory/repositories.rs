use async_trait::async_trait;

use crate::domain::entities::{
    Address, Book, BookPatch, BookWithAuthors, Category, CategoryWithProducts, Comment, NewBook,
    NewProduct, NewUser, Product, ProductDetails, ProductPatch, ProfileImage, User,
};
use crate::errors::DomainError;
use crate::repositories::{
    BookRepository, CategoryRepository, CategoryTransaction, CommentRepository,
    ProductRepository, ProfileImageRepository, UserRepository,
};

use super::{InMemoryCategoryTransaction, InMemoryStore, State};

fn ensure_name_free(state: &State, name: &str, except: Option<i32>) -> Result<(), DomainError> {
    let taken = state
        .categories
        .values()
        .any(|category| category.name == name && Some(category.id) != except);
    if taken {
        return Err(DomainError::conflict("Category with this name already exists."));
    }
    Ok(())
}

fn ensure_authors_exist(state: &State, author_ids: &[i32]) -> Result<(), DomainError> {
    if author_ids.iter().any(|id| !state.authors.contains_key(id)) {
        return Err(DomainError::bad_request("Unknown author id"));
    }
    Ok(())
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.state.lock().await.categories.values().cloned().collect())
    }

    async fn find_by_id_with_products(
        &self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError> {
        Ok(self.state.lock().await.category_with_products(id))
    }

    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let mut state = self.state.lock().await;
        ensure_name_free(&state, name, None)?;
        let id = state.next_id("categories");
        let category = Category::new(id, name);
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, id: i32, name: Option<&str>) -> Result<Option<Category>, DomainError> {
        let mut state = self.state.lock().await;
        if !state.categories.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = name {
            ensure_name_free(&state, name, Some(id))?;
        }
        let category = state.categories.get_mut(&id).map(|category| {
            if let Some(name) = name {
                category.name = name.to_string();
            }
            category.clone()
        });
        Ok(category)
    }

    async fn begin(&self) -> Result<Box<dyn CategoryTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(InMemoryCategoryTransaction::new(guard)))
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.state.lock().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.state.lock().await.products.get(&id).cloned())
    }

    async fn find_details(&self, id: i32) -> Result<Option<ProductDetails>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.products.get(&id).map(|product| ProductDetails {
            product: product.clone(),
            user: state.user_with_address(product.user_id),
            categories: state.categories_of(id),
        }))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut state = self.state.lock().await;
        if state.products.values().any(|existing| existing.name == product.name) {
            return Err(DomainError::conflict("Duplicate product name"));
        }
        if !state.users.contains_key(&product.user_id) {
            return Err(DomainError::bad_request("Unknown owner id"));
        }
        if product
            .category_ids
            .iter()
            .any(|id| !state.categories.contains_key(id))
        {
            return Err(DomainError::bad_request("Unknown category id"));
        }

        let id = state.next_id("products");
        let created = Product {
            id,
            name: product.name,
            price_in_pln_gr: product.price_in_pln_gr,
            is_in_stock: product.is_in_stock,
            description: product.description,
            upvotes: 0,
            user_id: product.user_id,
        };
        state.products.insert(id, created.clone());
        for category_id in product.category_ids {
            state.category_products.insert((category_id, id));
        }
        Ok(created)
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError> {
        let mut state = self.state.lock().await;
        if let Some(name) = &patch.name {
            if state
                .products
                .values()
                .any(|existing| &existing.name == name && existing.id != id)
            {
                return Err(DomainError::conflict("Duplicate product name"));
            }
        }
        Ok(state.products.get_mut(&id).map(|product| {
            patch.apply(product);
            product.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.remove_products(&[id]) == 1)
    }

    async fn add_upvotes(&self, id: i32, delta: i32) -> Result<Option<Product>, DomainError> {
        let mut state = self.state.lock().await;
        Ok(state.products.get_mut(&id).map(|product| {
            product.upvotes += delta;
            product.clone()
        }))
    }

    async fn delete_with_upvotes_below(&self, threshold: i32) -> Result<u64, DomainError> {
        let mut state = self.state.lock().await;
        let doomed: Vec<i32> = state
            .products
            .values()
            .filter(|product| product.upvotes < threshold)
            .map(|product| product.id)
            .collect();
        Ok(state.remove_products(&doomed))
    }

    async fn transfer_ownership(&self, from_user: i32, to_user: i32) -> Result<u64, DomainError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&from_user) || !state.users.contains_key(&to_user) {
            return Err(DomainError::not_found("User not found"));
        }
        let mut moved = 0;
        for product in state.products.values_mut() {
            if product.user_id == from_user {
                product.user_id = to_user;
                moved += 1;
            }
        }
        Ok(moved)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.state.lock().await.user_with_address(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().await;
        let id = state
            .users
            .values()
            .find(|user| user.email == email)
            .map(|user| user.id);
        Ok(id.and_then(|id| state.user_with_address(id)))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(DomainError::conflict("Duplicate email"));
        }

        let address_id = match user.address {
            Some(address) => {
                let id = state.next_id("addresses");
                state.addresses.insert(
                    id,
                    Address {
                        id,
                        street: address.street,
                        city: address.city,
                        country: address.country,
                    },
                );
                Some(id)
            }
            None => None,
        };

        let id = state.next_id("users");
        state.users.insert(
            id,
            User {
                id,
                email: user.email,
                name: user.name,
                password: user.password,
                phone_number: user.phone_number,
                address_id,
                address: None,
                profile_image_id: None,
            },
        );
        state
            .user_with_address(id)
            .ok_or_else(|| DomainError::internal("User vanished after insert"))
    }

    async fn update_phone_number(
        &self,
        id: i32,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.state.lock().await;
        match state.users.get_mut(&id) {
            Some(user) => user.phone_number = Some(phone_number.to_string()),
            None => return Ok(None),
        }
        Ok(state.user_with_address(id))
    }

    async fn delete_account(&self, id: i32, new_author: Option<i32>) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        let Some(user) = state.users.get(&id).cloned() else {
            return Ok(false);
        };
        if let Some(new_author) = new_author {
            if !state.users.contains_key(&new_author) {
                return Err(DomainError::not_found("New author not found"));
            }
        }

        let owned: Vec<i32> = state
            .products
            .values()
            .filter(|product| product.user_id == id)
            .map(|product| product.id)
            .collect();
        match new_author {
            Some(new_author) => {
                for product_id in &owned {
                    if let Some(product) = state.products.get_mut(product_id) {
                        product.user_id = new_author;
                    }
                }
            }
            None => {
                state.remove_products(&owned);
            }
        }

        state.comments.retain(|_, comment| comment.user_id != id);
        if let Some(image_id) = user.profile_image_id {
            state.profile_images.remove(&image_id);
        }
        if let Some(address_id) = user.address_id {
            state.addresses.remove(&address_id);
        }
        state.users.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        Ok(self.state.lock().await.comments.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        Ok(self.state.lock().await.comments.get(&id).cloned())
    }

    async fn create(&self, user_id: i32, text: &str) -> Result<Comment, DomainError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::bad_request("Unknown user id"));
        }
        let id = state.next_id("comments");
        let comment = Comment {
            id,
            text: text.to_string(),
            user_id,
        };
        state.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, id: i32, text: Option<&str>) -> Result<Option<Comment>, DomainError> {
        let mut state = self.state.lock().await;
        Ok(state.comments.get_mut(&id).map(|comment| {
            if let Some(text) = text {
                comment.text = text.to_string();
            }
            comment.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self.state.lock().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookWithAuthors>, DomainError> {
        Ok(self.state.lock().await.book_with_authors(id))
    }

    async fn create(&self, book: NewBook) -> Result<BookWithAuthors, DomainError> {
        let mut state = self.state.lock().await;
        ensure_authors_exist(&state, &book.author_ids)?;
        let id = state.next_id("books");
        state.books.insert(
            id,
            Book {
                id,
                title: book.title,
                price_in_pln_gr: book.price_in_pln_gr,
            },
        );
        for author_id in book.author_ids {
            state.book_authors.insert((id, author_id));
        }
        state
            .book_with_authors(id)
            .ok_or_else(|| DomainError::internal("Book vanished after insert"))
    }

    async fn update(
        &self,
        id: i32,
        patch: BookPatch,
    ) -> Result<Option<BookWithAuthors>, DomainError> {
        let mut state = self.state.lock().await;
        if !state.books.contains_key(&id) {
            return Ok(None);
        }
        if let Some(author_ids) = &patch.author_ids {
            ensure_authors_exist(&state, author_ids)?;
            state.book_authors.retain(|(book_id, _)| *book_id != id);
            for author_id in author_ids {
                state.book_authors.insert((id, *author_id));
            }
        }
        if let Some(book) = state.books.get_mut(&id) {
            if let Some(title) = patch.title {
                book.title = title;
            }
            if let Some(price) = patch.price_in_pln_gr {
                book.price_in_pln_gr = price;
            }
        }
        Ok(state.book_with_authors(id))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        state.book_authors.retain(|(book_id, _)| *book_id != id);
        Ok(state.books.remove(&id).is_some())
    }
}

#[async_trait]
impl ProfileImageRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<ProfileImage>, DomainError> {
        Ok(self.state.lock().await.profile_images.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProfileImage>, DomainError> {
        Ok(self.state.lock().await.profile_images.get(&id).cloned())
    }

    async fn create_for_user(&self, user_id: i32, url: &str) -> Result<ProfileImage, DomainError> {
        let mut state = self.state.lock().await;
        match state.users.get(&user_id) {
            None => return Err(DomainError::not_found("User not found")),
            Some(user) if user.has_profile_image() => {
                return Err(DomainError::conflict("Profile image already attached"))
            }
            Some(_) => {}
        }
        let id = state.next_id("profile_images");
        let image = ProfileImage {
            id,
            url: url.to_string(),
        };
        state.profile_images.insert(id, image.clone());
        if let Some(user) = state.users.get_mut(&user_id) {
            user.profile_image_id = Some(id);
        }
        Ok(image)
    }

    async fn update(&self, id: i32, url: Option<&str>) -> Result<Option<ProfileImage>, DomainError> {
        let mut state = self.state.lock().await;
        Ok(state.profile_images.get_mut(&id).map(|image| {
            if let Some(url) = url {
                image.url = url.to_string();
            }
            image.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        if state.profile_images.remove(&id).is_none() {
            return Ok(false);
        }
        for user in state.users.values_mut() {
            if user.profile_image_id == Some(id) {
                user.profile_image_id = None;
            }
        }
        Ok(true)
    }
}
