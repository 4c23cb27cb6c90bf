use std::fmt;

#[derive(Debug, Default, Clone)]
pub struct Post {
    pub ID: i64,
    pub SemURL: String,
    pub Created: chrono::NaiveDateTime,
    pub Modified: chrono::NaiveDateTime,
    pub Published: Option<chrono::NaiveDateTime>,
    pub Draft: bool,
    pub Title: String,
    pub Body: String,
}

impl Post {
    pub fn url(&self) -> String {
        format!("/posts/{}", self.SemURL)
    }

    pub fn publish(&mut self, at: chrono::NaiveDateTime) {
        self.Published = Some(at);
        self.Draft = false;
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.Title)
    }
}

fn draft_count(posts: &[Post]) -> usize {
    posts.iter().filter(|p| p.Draft).count()
}
