//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records how many have run.
//!
//! Foreign keys are declared without `ON DELETE CASCADE`. Dependent rows are
//! removed explicitly by [`crate::cascade`], so a missed step surfaces as a
//! constraint error instead of silently orphaned or silently vanished data.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    login_id    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    nickname    TEXT NOT NULL,
    grade       TEXT NOT NULL DEFAULT 'silver',  -- 'silver', 'gold', 'red', 'admin'
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_nickname ON users(nickname);
"#,
    // v2: boards
    r#"
CREATE TABLE boards (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id      INTEGER NOT NULL REFERENCES users(id),
    title        TEXT NOT NULL,
    content      TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    modified_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_boards_user_id ON boards(user_id);
"#,
    // v3: comments and replies
    r#"
CREATE TABLE comments (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id     INTEGER NOT NULL REFERENCES boards(id),
    user_id      INTEGER NOT NULL REFERENCES users(id),
    comment      TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    modified_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_comments_board_id ON comments(board_id);
CREATE INDEX idx_comments_user_id ON comments(user_id);

CREATE TABLE replies (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id     INTEGER NOT NULL REFERENCES boards(id),
    comment_id   INTEGER NOT NULL REFERENCES comments(id),
    user_id      INTEGER NOT NULL REFERENCES users(id),
    reply        TEXT NOT NULL,
    created_at   TEXT NOT NULL DEFAULT (datetime('now')),
    modified_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_replies_board_id ON replies(board_id);
CREATE INDEX idx_replies_comment_id ON replies(comment_id);
CREATE INDEX idx_replies_user_id ON replies(user_id);
"#,
    // v4: likes and reports, one per (user, board)
    r#"
CREATE TABLE likes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    board_id    INTEGER NOT NULL REFERENCES boards(id),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, board_id)
);

CREATE INDEX idx_likes_board_id ON likes(board_id);

CREATE TABLE reports (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id),
    board_id        INTEGER NOT NULL REFERENCES boards(id),
    report_content  TEXT NOT NULL,
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, board_id)
);

CREATE INDEX idx_reports_board_id ON reports(board_id);
"#,
];
