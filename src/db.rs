use crate::config::DatabaseConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::post::{Post, PostWithAuthor};
use crate::models::user::User;
use async_trait::async_trait;
use deadpool_postgres::{Config, Object, Pool, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tracing::{error, info};

/// ハンドラが依存するデータアクセスの境界。
/// 本番では `Database` (PostgreSQL) を、テストではインメモリ実装を `Arc<dyn Repository>` として差し込む。
#[async_trait]
pub trait Repository: Send + Sync {
    /// `SELECT 1` の結果をそのまま返す疎通確認。
    async fn ping(&self) -> ApiResult<i32>;

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    async fn find_user_by_id(&self, id: i32) -> ApiResult<Option<User>>;

    /// メールの一意制約に違反した場合は `ApiError::Conflict` を返すこと。
    async fn insert_user(&self, email: &str, password_hash: &str) -> ApiResult<User>;

    async fn insert_post(&self, user_id: i32, title: &str, content: &str) -> ApiResult<Post>;

    /// 全ポストを投稿者のメール付きで返す。ページングはしない。
    async fn list_posts_with_authors(&self) -> ApiResult<Vec<PostWithAuthor>>;
}

/// PostgreSQL への接続プールを握るリポジトリ層。
/// 各メソッドはプールから 1 接続を借り、`Object` が drop された時点でプールへ返却される。
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// 接続プールを構築し、起動時に疎通確認まで実施する。
    pub async fn new(config: &DatabaseConfig) -> Result<Self, ApiError> {
        info!("Creating PostgreSQL connection pool for host: {}", config.redacted_host());

        let pool = Self::create_pool(config)?;

        let db = Database { pool };
        db.test_connection().await?;

        Ok(db)
    }

    /// Deadpool 用の `Config` を組み立ててプールを生成する内部関数。
    /// sslmode は接続 URL 側の指定に従い、TLS が必要な場合に備えて `native_tls` のコネクタを渡しておく。
    fn create_pool(config: &DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();
        pg_config.url = Some(config.url.clone());

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        let mut pool_config = deadpool_postgres::PoolConfig::new(config.max_connections as usize);
        pool_config.timeouts.wait = Some(config.connection_timeout);
        pool_config.timeouts.create = Some(config.connection_timeout);
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder()
            .build()
            .map_err(|e| {
                error!("Failed to create TLS connector: {}", e);
                ApiError::Database(format!("TLS connector creation failed: {}", e))
            })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config.create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    /// プールから接続を借りる小さなラッパー。
    /// `deadpool_postgres::Pool::get` が返す `PoolError` を `ApiError` に変換する。
    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// アプリ起動時にテーブル群を CREATE する簡易マイグレーター。
    /// 何度実行しても結果が変わらないよう、すべて `IF NOT EXISTS` で書いている。
    pub async fn migrate(&self) -> Result<(), ApiError> {
        info!("Running database migrations");

        let client = self.get_connection().await?;

        let users_table = r#"
            CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                email VARCHAR(255) UNIQUE NOT NULL,
                password_hash VARCHAR(255) NOT NULL
            )
        "#;

        client.execute(users_table, &[])
            .await
            .map_err(|e| {
                error!("Failed to create users table: {}", e);
                ApiError::Database(format!("Users table creation failed: {}", e))
            })?;

        let users_email_index = "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)";
        client.execute(users_email_index, &[])
            .await
            .map_err(|e| {
                error!("Failed to create users email index: {}", e);
                ApiError::Database(format!("Users email index creation failed: {}", e))
            })?;

        let posts_table = r#"
            CREATE TABLE IF NOT EXISTS posts (
                id SERIAL PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                content TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
        "#;

        client.execute(posts_table, &[])
            .await
            .map_err(|e| {
                error!("Failed to create posts table: {}", e);
                ApiError::Database(format!("Posts table creation failed: {}", e))
            })?;

        let posts_user_index = "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)";
        client.execute(posts_user_index, &[])
            .await
            .map_err(|e| {
                error!("Failed to create posts user_id index: {}", e);
                ApiError::Database(format!("Posts user_id index creation failed: {}", e))
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// `Database::new` 直後にプール全体が機能するかの確認に使う。
    pub async fn test_connection(&self) -> Result<(), ApiError> {
        let value = self.ping().await.map_err(|e| {
            error!("Database connection test failed: {}", e);
            e
        })?;

        info!("Database connection test successful (SELECT 1 -> {})", value);
        Ok(())
    }

    fn user_from_row(row: &tokio_postgres::Row) -> User {
        User {
            id: row.get(0),
            email: row.get(1),
            password_hash: row.get(2),
        }
    }
}

#[async_trait]
impl Repository for Database {
    async fn ping(&self) -> ApiResult<i32> {
        let client = self.get_connection().await?;

        let row = client.query_one("SELECT 1", &[])
            .await
            .map_err(ApiError::from)?;

        Ok(row.get(0))
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let client = self.get_connection().await?;
        let query = "SELECT id, email, password_hash FROM users WHERE email = $1";

        let row = client.query_opt(query, &[&email])
            .await
            .map_err(ApiError::from)?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    async fn find_user_by_id(&self, id: i32) -> ApiResult<Option<User>> {
        let client = self.get_connection().await?;
        let query = "SELECT id, email, password_hash FROM users WHERE id = $1";

        let row = client.query_opt(query, &[&id])
            .await
            .map_err(ApiError::from)?;

        Ok(row.as_ref().map(Self::user_from_row))
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> ApiResult<User> {
        let client = self.get_connection().await?;

        let query = r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
        "#;

        let row = client.query_one(query, &[&email, &password_hash])
            .await
            .map_err(ApiError::from)?;

        let user = Self::user_from_row(&row);
        info!("Created user with id: {}", user.id);
        Ok(user)
    }

    async fn insert_post(&self, user_id: i32, title: &str, content: &str) -> ApiResult<Post> {
        let client = self.get_connection().await?;

        let query = r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, user_id
        "#;

        let row = client.query_one(query, &[&title, &content, &user_id])
            .await
            .map_err(ApiError::from)?;

        let post = Post {
            id: row.get(0),
            title: row.get(1),
            content: row.get(2),
            user_id: row.get(3),
        };

        info!("Created post with id: {}", post.id);
        Ok(post)
    }

    async fn list_posts_with_authors(&self) -> ApiResult<Vec<PostWithAuthor>> {
        let client = self.get_connection().await?;
        let query = r#"
            SELECT p.id, p.title, p.content, u.email
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.id
        "#;

        let rows = client.query(query, &[])
            .await
            .map_err(ApiError::from)?;

        let posts: Vec<PostWithAuthor> = rows.iter().map(|row| {
            PostWithAuthor {
                id: row.get(0),
                title: row.get(1),
                content: row.get(2),
                author_email: row.get(3),
            }
        }).collect();

        Ok(posts)
    }
}
