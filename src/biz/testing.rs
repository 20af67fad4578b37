//! In-memory stores and auth fakes for business-layer tests

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use store_object::{Context, Record, StoreError, Where, UNBOUNDED};

use crate::biz::auth::{PasswordHasher, SignedToken, TokenSigner};
use crate::errors::AppResult;
use crate::model::{Post, User};
use crate::store::{IStore, PostStore, UserStore};

/// Evaluate the subset of conditions the business layer produces
fn matches(filter: &Where, field: impl Fn(&str) -> String) -> bool {
    let eq = filter
        .filters()
        .iter()
        .all(|(key, value)| value.as_text() == Some(field(key).as_str()));

    let raw = filter.raw_conditions().iter().all(|cond| {
        let args: Vec<&str> = cond.args.iter().filter_map(|v| v.as_text()).collect();
        if cond.expr.starts_with("post_id IN") {
            args.contains(&field("post_id").as_str())
        } else if cond.expr == "title LIKE ? ESCAPE '\\'" {
            field("title").contains(&unescape_like(args[0]))
        } else {
            panic!("unsupported raw condition {}", cond.expr)
        }
    });

    eq && raw
}

/// Literal needle of a `%needle%` pattern built with escaped wildcards
fn unescape_like(pattern: &str) -> String {
    let inner = pattern
        .strip_prefix('%')
        .and_then(|p| p.strip_suffix('%'))
        .unwrap_or(pattern);
    let mut needle = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => needle.extend(chars.next()),
            '%' | '_' => panic!("unescaped wildcard in {}", pattern),
            _ => needle.push(c),
        }
    }
    needle
}

fn page<T: Record>(mut rows: Vec<T>, filter: &Where) -> (i64, Vec<T>) {
    rows.sort_by_key(|row| std::cmp::Reverse(row.id()));
    let total = rows.len() as i64;
    let rows = rows.into_iter().skip(filter.offset() as usize);
    let rows = if filter.limit() == UNBOUNDED {
        rows.collect()
    } else {
        rows.take(filter.limit() as usize).collect()
    };
    (total, rows)
}

fn user_field(user: &User, key: &str) -> String {
    match key {
        "user_id" => user.user_id.clone(),
        "username" => user.username.clone(),
        "email" => user.email.clone(),
        other => panic!("unknown user field {}", other),
    }
}

fn post_field(post: &Post, key: &str) -> String {
    match key {
        "user_id" => post.user_id.clone(),
        "post_id" => post.post_id.clone(),
        "title" => post.title.clone(),
        other => panic!("unknown post field {}", other),
    }
}

#[derive(Default)]
pub(crate) struct FakeUsers {
    rows: Mutex<Vec<User>>,
    next: AtomicI64,
}

#[derive(Default)]
pub(crate) struct FakePosts {
    rows: Mutex<Vec<Post>>,
    next: AtomicI64,
    fail_reads: AtomicBool,
}

#[derive(Default)]
pub(crate) struct FakeStore {
    users: FakeUsers,
    posts: FakePosts,
}

impl FakeStore {
    pub(crate) fn user_by_name(&self, username: &str) -> Option<User> {
        let rows = self.users.rows.lock().unwrap();
        rows.iter().find(|u| u.username == username).cloned()
    }

    pub(crate) fn post(&self, post_id: &str) -> Option<Post> {
        let rows = self.posts.rows.lock().unwrap();
        rows.iter().find(|p| p.post_id == post_id).cloned()
    }

    pub(crate) fn seed_posts(&self, user_id: &str, n: usize) {
        for i in 0..n {
            let id = self.posts.next.fetch_add(1, Ordering::SeqCst) + 1;
            let mut post = Post::new(user_id, format!("seed {}", i), "");
            post.id = id;
            post.post_id = Post::derive_external_id(id as u64);
            self.posts.rows.lock().unwrap().push(post);
        }
    }

    pub(crate) fn fail_post_reads(&self) {
        self.posts.fail_reads.store(true, Ordering::SeqCst);
    }
}

impl IStore for FakeStore {
    fn users(&self) -> &dyn UserStore {
        &self.users
    }

    fn posts(&self) -> &dyn PostStore {
        &self.posts
    }

    fn new_where(&self) -> Where {
        Where::new()
    }
}

#[async_trait]
impl UserStore for FakeUsers {
    async fn create(&self, _ctx: &Context, user: &mut User) -> Result<(), StoreError> {
        let id = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        user.id = id;
        user.user_id = User::derive_external_id(id as u64);
        self.rows.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, _ctx: &Context, user: &User) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|u| u.id != user.id);
        rows.push(user.clone());
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, filter: &Where) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|u| !matches(filter, |k| user_field(u, k)));
        Ok(())
    }

    async fn get(&self, _ctx: &Context, filter: &Where) -> Result<User, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|u| matches(filter, |k| user_field(u, k)))
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    async fn list(&self, _ctx: &Context, filter: &Where) -> Result<(i64, Vec<User>), StoreError> {
        let rows: Vec<User> = {
            let rows = self.rows.lock().unwrap();
            rows.iter()
                .filter(|u| matches(filter, |k| user_field(u, k)))
                .cloned()
                .collect()
        };
        Ok(page(rows, filter))
    }
}

impl FakePosts {
    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StoreError::ReadFailure("injected".into()))
        } else {
            Ok(())
        }
    }

    fn matching(&self, filter: &Where) -> Vec<Post> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .filter(|p| matches(filter, |k| post_field(p, k)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostStore for FakePosts {
    async fn create(&self, _ctx: &Context, post: &mut Post) -> Result<(), StoreError> {
        let id = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        post.id = id;
        post.post_id = Post::derive_external_id(id as u64);
        self.rows.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn update(&self, _ctx: &Context, post: &Post) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|p| p.id != post.id);
        rows.push(post.clone());
        Ok(())
    }

    async fn delete(&self, _ctx: &Context, filter: &Where) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|p| !matches(filter, |k| post_field(p, k)));
        Ok(())
    }

    async fn get(&self, _ctx: &Context, filter: &Where) -> Result<Post, StoreError> {
        self.check_reads()?;
        self.matching(filter)
            .into_iter()
            .min_by_key(|p| p.id)
            .ok_or(StoreError::PostNotFound)
    }

    async fn list(&self, _ctx: &Context, filter: &Where) -> Result<(i64, Vec<Post>), StoreError> {
        self.check_reads()?;
        Ok(page(self.matching(filter), filter))
    }

    async fn count(&self, _ctx: &Context, filter: &Where) -> Result<i64, StoreError> {
        self.check_reads()?;
        Ok(self.matching(filter).len() as i64)
    }
}

pub(crate) struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, plain: &str) -> AppResult<String> {
        Ok(format!("hashed:{}", plain))
    }

    fn verify(&self, hashed: &str, plain: &str) -> bool {
        hashed.strip_prefix("hashed:") == Some(plain)
    }
}

#[derive(Default)]
pub(crate) struct FakeSigner {
    fail: bool,
}

impl FakeSigner {
    pub(crate) fn failing() -> Self {
        Self { fail: true }
    }
}

impl TokenSigner for FakeSigner {
    fn sign(&self, identity: &str) -> Result<SignedToken, String> {
        if self.fail {
            return Err("signing key unavailable".to_string());
        }
        Ok(SignedToken {
            token: format!("token-{}", identity),
            expire_at: Utc::now() + Duration::hours(2),
        })
    }
}
