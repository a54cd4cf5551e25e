mod reviews;
mod sessions;
