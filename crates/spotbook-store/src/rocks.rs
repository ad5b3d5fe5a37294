//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use spotbook_core::{Bookmark, BookmarkId, Cafe, CafeId, Review, ReviewId, User, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,

    /// Serializes check-then-write sequences that span an index and a primary
    /// record: bookmark pair uniqueness and the unique-name constraint.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!("RocksDB database opened");

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Acquire the writer critical section.
    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Get and deserialize a record from a column family.
    fn get_record<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        key: &[u8],
    ) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Serialize and store a record in a column family.
    fn put_record<T: serde::Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let data = Self::serialize(value)?;
        self.db
            .put_cf(&cf, key, data)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// List records from a primary column family in key (insertion) order,
    /// clamping `offset`/`limit` silently to the available range.
    fn list_records<T: serde::de::DeserializeOwned>(
        &self,
        cf_name: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start).skip(offset) {
            if records.len() >= limit {
                break;
            }
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }

    /// Collect the keys of an index prefix scan, in key order.
    fn scan_index_keys(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let cf = self.cf(cf_name)?;
        let iter = self.db.iterator_cf(
            &cf,
            IteratorMode::From(prefix, rocksdb::Direction::Forward),
        );

        let mut matched = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            matched.push(key.to_vec());
        }

        Ok(matched)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn create_user(&self, user: &User) -> Result<()> {
        let _guard = self.lock()?;

        let cf_names = self.cf(cf::USERS_BY_NAME)?;
        let name_key = keys::user_name_key(&user.name);

        let taken = self
            .db
            .get_cf(&cf_names, &name_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if taken {
            return Err(StoreError::DuplicateName {
                name: user.name.clone(),
            });
        }

        let cf_users = self.cf(cf::USERS)?;
        let user_key = keys::user_key(&user.id);
        let value = Self::serialize(user)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, &user_key, &value);
        batch.put_cf(&cf_names, &name_key, user.id.to_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        self.get_record(cf::USERS, &keys::user_key(user_id))
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let cf_names = self.cf(cf::USERS_BY_NAME)?;
        let Some(id_bytes) = self
            .db
            .get_cf(&cf_names, keys::user_name_key(name))
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut bytes = [0u8; 16];
        if id_bytes.len() != 16 {
            return Err(StoreError::Serialization("corrupt name index entry".into()));
        }
        bytes.copy_from_slice(&id_bytes);
        let user_id =
            UserId::from_bytes(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.get_user(&user_id)
    }

    fn list_users(&self, offset: usize, limit: usize) -> Result<Vec<User>> {
        self.list_records(cf::USERS, offset, limit)
    }

    fn update_user(&self, user: &User) -> Result<()> {
        let _guard = self.lock()?;

        let existing = self
            .get_user(&user.id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "user",
                id: user.id.to_string(),
            })?;

        let cf_users = self.cf(cf::USERS)?;
        let cf_names = self.cf(cf::USERS_BY_NAME)?;
        let value = Self::serialize(user)?;

        let mut batch = WriteBatch::default();

        // On rename, move the name index entry.
        if existing.name != user.name {
            let taken = self
                .db
                .get_cf(&cf_names, keys::user_name_key(&user.name))
                .map_err(|e| StoreError::Database(e.to_string()))?
                .is_some();
            if taken {
                return Err(StoreError::DuplicateName {
                    name: user.name.clone(),
                });
            }
            batch.delete_cf(&cf_names, keys::user_name_key(&existing.name));
            batch.put_cf(&cf_names, keys::user_name_key(&user.name), user.id.to_bytes());
        }

        batch.put_cf(&cf_users, keys::user_key(&user.id), &value);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn delete_user(&self, user_id: &UserId) -> Result<()> {
        let _guard = self.lock()?;

        let existing = self.get_user(user_id)?.ok_or_else(|| StoreError::NotFound {
            entity: "user",
            id: user_id.to_string(),
        })?;

        let cf_users = self.cf(cf::USERS)?;
        let cf_names = self.cf(cf::USERS_BY_NAME)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_users, keys::user_key(user_id));
        batch.delete_cf(&cf_names, keys::user_name_key(&existing.name));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Cafe Operations
    // =========================================================================

    fn create_cafe(&self, cafe: &Cafe) -> Result<()> {
        self.put_record(cf::CAFES, &keys::cafe_key(&cafe.id), cafe)
    }

    fn get_cafe(&self, cafe_id: &CafeId) -> Result<Option<Cafe>> {
        self.get_record(cf::CAFES, &keys::cafe_key(cafe_id))
    }

    fn list_cafes(&self, offset: usize, limit: usize) -> Result<Vec<Cafe>> {
        self.list_records(cf::CAFES, offset, limit)
    }

    fn update_cafe(&self, cafe: &Cafe) -> Result<()> {
        if self.get_cafe(&cafe.id)?.is_none() {
            return Err(StoreError::NotFound {
                entity: "cafe",
                id: cafe.id.to_string(),
            });
        }
        self.put_record(cf::CAFES, &keys::cafe_key(&cafe.id), cafe)
    }

    fn delete_cafe(&self, cafe_id: &CafeId) -> Result<()> {
        if self.get_cafe(cafe_id)?.is_none() {
            return Err(StoreError::NotFound {
                entity: "cafe",
                id: cafe_id.to_string(),
            });
        }

        let cf_cafes = self.cf(cf::CAFES)?;
        self.db
            .delete_cf(&cf_cafes, keys::cafe_key(cafe_id))
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Review Operations
    // =========================================================================

    fn create_review(&self, review: &Review) -> Result<()> {
        let cf_reviews = self.cf(cf::REVIEWS)?;
        let cf_by_cafe = self.cf(cf::REVIEWS_BY_CAFE)?;

        let review_key = keys::review_key(&review.id);
        let index_key = keys::cafe_review_key(&review.cafe_id, &review.id);
        let value = Self::serialize(review)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_reviews, &review_key, &value);
        batch.put_cf(&cf_by_cafe, &index_key, b""); // Index entry (empty value)

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_review(&self, review_id: &ReviewId) -> Result<Option<Review>> {
        self.get_record(cf::REVIEWS, &keys::review_key(review_id))
    }

    fn list_reviews_by_cafe(&self, cafe_id: &CafeId) -> Result<Vec<Review>> {
        let index_keys =
            self.scan_index_keys(cf::REVIEWS_BY_CAFE, &keys::cafe_reviews_prefix(cafe_id))?;

        let mut reviews = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let review_id = keys::extract_review_id_from_cafe_key(&key);
            if let Some(review) = self.get_review(&review_id)? {
                reviews.push(review);
            }
        }

        Ok(reviews)
    }

    fn update_review(&self, review: &Review) -> Result<()> {
        if self.get_review(&review.id)?.is_none() {
            return Err(StoreError::NotFound {
                entity: "review",
                id: review.id.to_string(),
            });
        }
        self.put_record(cf::REVIEWS, &keys::review_key(&review.id), review)
    }

    fn delete_review(&self, review_id: &ReviewId) -> Result<()> {
        let existing = self
            .get_review(review_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "review",
                id: review_id.to_string(),
            })?;

        let cf_reviews = self.cf(cf::REVIEWS)?;
        let cf_by_cafe = self.cf(cf::REVIEWS_BY_CAFE)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_reviews, keys::review_key(review_id));
        batch.delete_cf(
            &cf_by_cafe,
            keys::cafe_review_key(&existing.cafe_id, review_id),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    // =========================================================================
    // Bookmark Operations
    // =========================================================================

    fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<()> {
        // The pair check and the insert must not interleave with another
        // creation or deletion for the same pair.
        let _guard = self.lock()?;

        let cf_pairs = self.cf(cf::BOOKMARK_PAIRS)?;
        let pair_key = keys::bookmark_pair_key(&bookmark.user_id, &bookmark.cafe_id);

        let exists = self
            .db
            .get_cf(&cf_pairs, &pair_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if exists {
            return Err(StoreError::DuplicateBookmark {
                user_id: bookmark.user_id.to_string(),
                cafe_id: bookmark.cafe_id.to_string(),
            });
        }

        let cf_bookmarks = self.cf(cf::BOOKMARKS)?;
        let cf_by_user = self.cf(cf::BOOKMARKS_BY_USER)?;

        let bookmark_key = keys::bookmark_key(&bookmark.id);
        let user_index_key = keys::user_bookmark_key(&bookmark.user_id, &bookmark.id);
        let value = Self::serialize(bookmark)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_bookmarks, &bookmark_key, &value);
        batch.put_cf(&cf_by_user, &user_index_key, b""); // Index entry (empty value)
        batch.put_cf(&cf_pairs, &pair_key, bookmark.id.to_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_bookmark(&self, bookmark_id: &BookmarkId) -> Result<Option<Bookmark>> {
        self.get_record(cf::BOOKMARKS, &keys::bookmark_key(bookmark_id))
    }

    fn delete_bookmark(&self, bookmark_id: &BookmarkId) -> Result<()> {
        let _guard = self.lock()?;

        let existing = self
            .get_bookmark(bookmark_id)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "bookmark",
                id: bookmark_id.to_string(),
            })?;

        let cf_bookmarks = self.cf(cf::BOOKMARKS)?;
        let cf_by_user = self.cf(cf::BOOKMARKS_BY_USER)?;
        let cf_pairs = self.cf(cf::BOOKMARK_PAIRS)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_bookmarks, keys::bookmark_key(bookmark_id));
        batch.delete_cf(
            &cf_by_user,
            keys::user_bookmark_key(&existing.user_id, bookmark_id),
        );
        batch.delete_cf(
            &cf_pairs,
            keys::bookmark_pair_key(&existing.user_id, &existing.cafe_id),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn delete_bookmark_by_pair(&self, user_id: &UserId, cafe_id: &CafeId) -> Result<()> {
        let _guard = self.lock()?;

        let cf_pairs = self.cf(cf::BOOKMARK_PAIRS)?;
        let pair_key = keys::bookmark_pair_key(user_id, cafe_id);

        let Some(id_bytes) = self
            .db
            .get_cf(&cf_pairs, &pair_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Err(StoreError::NotFound {
                entity: "bookmark",
                id: format!("user {user_id}, cafe {cafe_id}"),
            });
        };

        let mut bytes = [0u8; 16];
        if id_bytes.len() != 16 {
            return Err(StoreError::Serialization("corrupt pair index entry".into()));
        }
        bytes.copy_from_slice(&id_bytes);
        let bookmark_id =
            BookmarkId::from_bytes(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let cf_bookmarks = self.cf(cf::BOOKMARKS)?;
        let cf_by_user = self.cf(cf::BOOKMARKS_BY_USER)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_bookmarks, keys::bookmark_key(&bookmark_id));
        batch.delete_cf(&cf_by_user, keys::user_bookmark_key(user_id, &bookmark_id));
        batch.delete_cf(&cf_pairs, &pair_key);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn bookmark_exists(&self, user_id: &UserId, cafe_id: &CafeId) -> Result<bool> {
        let cf_pairs = self.cf(cf::BOOKMARK_PAIRS)?;
        let exists = self
            .db
            .get_cf(&cf_pairs, keys::bookmark_pair_key(user_id, cafe_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        Ok(exists)
    }

    fn list_bookmarks_by_user(&self, user_id: &UserId) -> Result<Vec<Bookmark>> {
        // ULID index keys iterate oldest first, which is the creation order
        // required for the listing.
        let index_keys =
            self.scan_index_keys(cf::BOOKMARKS_BY_USER, &keys::user_bookmarks_prefix(user_id))?;

        let mut bookmarks = Vec::with_capacity(index_keys.len());
        for key in index_keys {
            let bookmark_id = keys::extract_bookmark_id_from_user_key(&key);
            if let Some(bookmark) = self.get_bookmark(&bookmark_id)? {
                bookmarks.push(bookmark);
            }
        }

        Ok(bookmarks)
    }
}
