//! Simulation-mode feed: a scrollable list of posts where each distinct post
//! counts as one scroll the first time it becomes the current item.

use std::collections::HashSet;

use crate::content::Post;

/// How close to the end of the list the cursor may get before more posts are
/// requested.
pub const LOAD_AHEAD: usize = 2;

#[derive(Debug, Default)]
pub struct FeedSession {
    posts: Vec<Post>,
    viewed: HashSet<String>,
    cursor: usize,
}

impl FeedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Post> {
        self.posts.get(self.cursor)
    }

    /// Number of distinct posts seen this session.
    pub fn viewed_count(&self) -> usize {
        self.viewed.len()
    }

    /// Append a batch. Posts already in the list (by id) are skipped.
    /// Returns how many were added.
    pub fn extend(&mut self, batch: Vec<Post>) -> usize {
        let before = self.posts.len();
        for post in batch {
            if !self.posts.iter().any(|p| p.id == post.id) {
                self.posts.push(post);
            }
        }
        self.posts.len() - before
    }

    /// Record the current post as viewed. Returns true the first time.
    pub fn observe_current(&mut self) -> bool {
        match self.posts.get(self.cursor) {
            Some(post) => self.viewed.insert(post.id.clone()),
            None => false,
        }
    }

    /// Move to the next post. Returns false at the end of the list.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 < self.posts.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous post. Returns false at the top.
    pub fn previous(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// True when the cursor is within the last [`LOAD_AHEAD`] posts.
    pub fn wants_more(&self) -> bool {
        self.cursor + LOAD_AHEAD >= self.posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback_posts;

    fn feed(n: usize) -> FeedSession {
        let mut feed = FeedSession::new();
        feed.extend(fallback_posts(n));
        feed
    }

    #[test]
    fn first_view_counts_once() {
        let mut feed = feed(3);
        assert!(feed.observe_current());
        assert!(!feed.observe_current());
        assert!(feed.next());
        assert!(feed.observe_current());
        assert!(feed.previous());
        assert!(!feed.observe_current());
        assert_eq!(feed.viewed_count(), 2);
    }

    #[test]
    fn empty_feed_observes_nothing() {
        let mut feed = FeedSession::new();
        assert!(feed.current().is_none());
        assert!(!feed.observe_current());
        assert!(feed.wants_more());
        assert!(!feed.next());
    }

    #[test]
    fn wants_more_near_end() {
        let mut feed = feed(5);
        assert!(!feed.wants_more());
        feed.next();
        feed.next();
        assert!(!feed.wants_more());
        feed.next();
        assert!(feed.wants_more());
    }

    #[test]
    fn extend_skips_known_ids() {
        let mut feed = FeedSession::new();
        let batch = fallback_posts(3);
        assert_eq!(feed.extend(batch.clone()), 3);
        assert_eq!(feed.extend(batch), 0);
        assert_eq!(feed.extend(fallback_posts(3)), 3);
        assert_eq!(feed.posts().len(), 6);
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut feed = feed(2);
        assert!(!feed.previous());
        assert!(feed.next());
        assert!(!feed.next());
        assert_eq!(feed.cursor(), 1);
    }
}
