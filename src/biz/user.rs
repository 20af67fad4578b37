use std::sync::Arc;

use resource_id::ResourceKind;
use store_object::Context;

use crate::api::{
    ChangePasswordRequest, ChangePasswordResponse, CreateUserRequest, CreateUserResponse,
    DeleteUserRequest, DeleteUserResponse, GetUserRequest, GetUserResponse, ListUserRequest,
    ListUserResponse, LoginRequest, LoginResponse, RefreshTokenResponse, UpdateUserRequest,
    UpdateUserResponse, User as UserView,
};
use crate::biz::auth::{PasswordHasher, SignedToken, TokenSigner};
use crate::biz::{caller, fanout::fan_out};
use crate::errors::{AppError, AppResult};
use crate::model::User;
use crate::store::IStore;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;

pub struct UserBiz {
    store: Arc<dyn IStore>,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
    max_fanout_concurrency: usize,
}

impl UserBiz {
    pub fn new(
        store: Arc<dyn IStore>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        max_fanout_concurrency: usize,
    ) -> Self {
        Self {
            store,
            hasher,
            signer,
            max_fanout_concurrency,
        }
    }

    pub async fn create(
        &self,
        ctx: &Context,
        req: CreateUserRequest,
    ) -> AppResult<CreateUserResponse> {
        validate_username(&req.username)?;

        let by_name = self
            .store
            .new_where()
            .with_filter("username", req.username.as_str());
        match self.store.users().get(ctx, &by_name).await {
            Ok(_) => return Err(AppError::UserAlreadyExists),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let password = self.hasher.hash(&req.password)?;
        let mut user = User::new(
            req.username,
            password,
            req.nickname.unwrap_or_default(),
            req.email,
            req.phone,
        );
        self.store.users().create(ctx, &mut user).await?;

        tracing::info!(user_id = %user.user_id, "user created");
        Ok(CreateUserResponse {
            user_id: user.user_id,
        })
    }

    /// Partial update of the caller's own record
    pub async fn update(
        &self,
        ctx: &Context,
        req: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        let mut user = self.own_record(ctx).await?;

        if let Some(username) = req.username {
            validate_username(&username)?;
            user.username = username;
        }
        if let Some(nickname) = req.nickname {
            user.nickname = nickname;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(phone) = req.phone {
            user.phone = phone;
        }

        self.store.users().update(ctx, &user).await?;
        Ok(UpdateUserResponse {})
    }

    pub async fn delete(
        &self,
        ctx: &Context,
        _req: DeleteUserRequest,
    ) -> AppResult<DeleteUserResponse> {
        let user_id = caller(ctx)?;
        let filter = self.store.new_where().with_filter("user_id", user_id);
        self.store.users().delete(ctx, &filter).await?;
        Ok(DeleteUserResponse {})
    }

    pub async fn get(&self, ctx: &Context, req: GetUserRequest) -> AppResult<GetUserResponse> {
        let own = caller(ctx)?;
        let user_id = if req.user_id.is_empty() {
            own
        } else {
            ResourceKind::User.validate(&req.user_id)?;
            req.user_id.as_str()
        };

        let filter = self.store.new_where().with_filter("user_id", user_id);
        let user = self.store.users().get(ctx, &filter).await?;
        Ok(GetUserResponse {
            user: UserView::from(&user),
        })
    }

    /// One page of users, each with its post count
    pub async fn list(&self, ctx: &Context, req: ListUserRequest) -> AppResult<ListUserResponse> {
        let filter = self
            .store
            .new_where()
            .with_offset(req.offset)
            .with_limit(req.limit);
        let (total, users) = self.store.users().list(ctx, &filter).await?;

        let posts = self.store.posts();
        let keys = users.iter().map(|user| user.user_id.clone());
        let counts = fan_out(keys, self.max_fanout_concurrency, |user_id| {
            let filter = self.store.new_where().with_filter("user_id", user_id);
            async move { posts.count(ctx, &filter).await }
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to count posts per user");
            e
        })?;

        let users = users
            .iter()
            .map(|user| {
                let mut view = UserView::from(user);
                view.post_count = counts.get(&user.user_id).copied().unwrap_or_default();
                view
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = users.len(), total, "listed users");
        Ok(ListUserResponse { total, users })
    }

    pub async fn login(&self, ctx: &Context, req: LoginRequest) -> AppResult<LoginResponse> {
        let filter = self
            .store
            .new_where()
            .with_filter("username", req.username.as_str());
        let user = self.store.users().get(ctx, &filter).await?;

        if !self.hasher.verify(&user.password, &req.password) {
            return Err(AppError::InvalidPassword);
        }

        let SignedToken { token, expire_at } = self.sign(&user.user_id)?;
        Ok(LoginResponse { token, expire_at })
    }

    pub async fn refresh_token(&self, ctx: &Context) -> AppResult<RefreshTokenResponse> {
        let user_id = caller(ctx)?;
        let SignedToken { token, expire_at } = self.sign(user_id)?;
        Ok(RefreshTokenResponse { token, expire_at })
    }

    pub async fn change_password(
        &self,
        ctx: &Context,
        req: ChangePasswordRequest,
    ) -> AppResult<ChangePasswordResponse> {
        let mut user = self.own_record(ctx).await?;

        if !self.hasher.verify(&user.password, &req.old_password) {
            tracing::warn!(user_id = %user.user_id, "password change rejected");
            return Err(AppError::InvalidPassword);
        }

        user.password = self.hasher.hash(&req.new_password)?;
        self.store.users().update(ctx, &user).await?;
        Ok(ChangePasswordResponse {})
    }

    async fn own_record(&self, ctx: &Context) -> AppResult<User> {
        let user_id = caller(ctx)?;
        let filter = self.store.new_where().with_filter("user_id", user_id);
        Ok(self.store.users().get(ctx, &filter).await?)
    }

    fn sign(&self, identity: &str) -> AppResult<SignedToken> {
        self.signer.sign(identity).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            AppError::SignToken(e)
        })
    }
}

/// Letters, digits and underscores, 3 to 20 characters
fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    let valid = (USERNAME_MIN..=USERNAME_MAX).contains(&len)
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidUsername(format!(
            "username must be {}-{} letters, digits or underscores",
            USERNAME_MIN, USERNAME_MAX
        )))
    }
}
