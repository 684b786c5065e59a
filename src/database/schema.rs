use sqlx::SqlitePool;

// Timestamps are stored as ISO-8601 TEXT so lexicographic order matches
// chronological order. Flags are INTEGER 0/1.
const SQL_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  user_id             TEXT PRIMARY KEY,
  username            TEXT NOT NULL UNIQUE,
  display_name        TEXT NOT NULL,
  email               TEXT NOT NULL UNIQUE,
  first_name          TEXT,
  last_name           TEXT,
  about_me            TEXT,
  city                TEXT,
  state               TEXT,
  zip_code            TEXT,
  latitude            REAL,
  longitude           REAL,
  profile_picture_url TEXT,
  preferred_language  TEXT DEFAULT 'en',
  profile_visibility  TEXT DEFAULT 'public',
  has_pets            INTEGER NOT NULL DEFAULT 0,
  profile_incomplete  INTEGER NOT NULL DEFAULT 1,
  num_friends         INTEGER NOT NULL DEFAULT 0,
  created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  is_deleted          INTEGER NOT NULL DEFAULT 0
)
"#;

const SQL_CREATE_FRIENDSHIPS: &str = r#"
CREATE TABLE IF NOT EXISTS friendships (
  friendship_id TEXT PRIMARY KEY,
  from_user_id  TEXT NOT NULL REFERENCES users(user_id),
  to_user_id    TEXT NOT NULL REFERENCES users(user_id),
  status        TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending','accepted','rejected')),
  created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  UNIQUE (from_user_id, to_user_id)
)
"#;

const SQL_CREATE_PETS: &str = r#"
CREATE TABLE IF NOT EXISTS pets (
  pet_id              TEXT PRIMARY KEY,
  owner_id            TEXT NOT NULL REFERENCES users(user_id),
  name                TEXT NOT NULL,
  pet_type            TEXT NOT NULL DEFAULT 'other'
                      CHECK (pet_type IN ('dog','cat','bird','reptile','other')),
  breed               TEXT,
  color               TEXT,
  age                 INTEGER,
  description         TEXT,
  profile_picture_url TEXT,
  created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  is_deleted          INTEGER NOT NULL DEFAULT 0
)
"#;

const SQL_CREATE_POSTS: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
  post_id    TEXT PRIMARY KEY,
  user_id    TEXT NOT NULL REFERENCES users(user_id),
  content    TEXT NOT NULL,
  visibility TEXT NOT NULL DEFAULT 'public'
             CHECK (visibility IN ('public','friends_only')),
  photo_url  TEXT,
  timestamp  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  is_active  INTEGER NOT NULL DEFAULT 1
)
"#;

const SQL_CREATE_POSTS_TIMESTAMP_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_posts_timestamp ON posts (timestamp DESC)
"#;

const SQL_CREATE_POST_PETS: &str = r#"
CREATE TABLE IF NOT EXISTS post_pets (
  post_id TEXT NOT NULL REFERENCES posts(post_id),
  pet_id  TEXT NOT NULL REFERENCES pets(pet_id),
  PRIMARY KEY (post_id, pet_id)
)
"#;

const SQL_CREATE_COMMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
  comment_id TEXT PRIMARY KEY,
  post_id    TEXT NOT NULL REFERENCES posts(post_id),
  user_id    TEXT NOT NULL REFERENCES users(user_id),
  content    TEXT NOT NULL,
  timestamp  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  is_active  INTEGER NOT NULL DEFAULT 1
)
"#;

const SQL_CREATE_LIKES: &str = r#"
CREATE TABLE IF NOT EXISTS likes (
  like_id   TEXT PRIMARY KEY,
  post_id   TEXT NOT NULL REFERENCES posts(post_id),
  user_id   TEXT NOT NULL REFERENCES users(user_id),
  timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  UNIQUE (post_id, user_id)
)
"#;

const SQL_CREATE_PET_TRANSFER_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS pet_transfer_requests (
  transfer_id  TEXT PRIMARY KEY,
  pet_id       TEXT NOT NULL REFERENCES pets(pet_id),
  from_user_id TEXT NOT NULL REFERENCES users(user_id),
  to_user_id   TEXT NOT NULL REFERENCES users(user_id),
  status       TEXT NOT NULL DEFAULT 'pending'
               CHECK (status IN ('pending','approved','rejected','canceled')),
  message      TEXT,
  created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
  updated_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
)
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    let statements = [
        SQL_CREATE_USERS,
        SQL_CREATE_FRIENDSHIPS,
        SQL_CREATE_PETS,
        SQL_CREATE_POSTS,
        SQL_CREATE_POSTS_TIMESTAMP_INDEX,
        SQL_CREATE_POST_PETS,
        SQL_CREATE_COMMENTS,
        SQL_CREATE_LIKES,
        SQL_CREATE_PET_TRANSFER_REQUESTS,
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}
