//! SeaORM entity definitions mirroring the `users` and `posts` tables.

pub mod post;
pub mod user;
