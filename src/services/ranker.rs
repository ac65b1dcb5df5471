//! Engagement ranking for board posts.

use crate::models::{Digest, DigestConfig, Post};

/// Orders posts by `views + likes * like_weight`.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    like_weight: u64,
    best_count: usize,
}

impl Ranker {
    pub fn new(like_weight: u64, best_count: usize) -> Self {
        Self {
            like_weight,
            best_count,
        }
    }

    /// Build a digest: `latest` is the input untouched, `best` the top
    /// scorers. Equal scores keep their original relative order.
    pub fn rank(&self, posts: Vec<Post>) -> Digest {
        let mut best = posts.clone();
        best.sort_by(|a, b| b.score(self.like_weight).cmp(&a.score(self.like_weight)));
        best.truncate(self.best_count);

        Digest {
            best,
            latest: posts,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::from(&DigestConfig::default())
    }
}

impl From<&DigestConfig> for Ranker {
    fn from(config: &DigestConfig) -> Self {
        Self::new(config.like_weight, config.best_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u32, views: u64, likes: u64) -> Post {
        Post {
            title: format!("post{id}"),
            link: format!("https://finance.naver.com/item/board_read.naver?nid={id}"),
            date: "2024.01.15 10:00".to_string(),
            views: views.to_string(),
            likes: likes.to_string(),
            views_int: views,
            likes_int: likes,
        }
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_likes_outweigh_views() {
        let posts = vec![post(1, 100, 1), post(2, 50, 10), post(3, 10, 20)];

        let digest = Ranker::default().rank(posts.clone());

        assert_eq!(titles(&digest.best), vec!["post3", "post2", "post1"]);
        assert_eq!(digest.latest, posts);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        // 20, 20, 20 (as 10 + 1 * 10), 30
        let posts = vec![post(1, 20, 0), post(2, 10, 1), post(3, 20, 0), post(4, 30, 0)];

        let digest = Ranker::default().rank(posts);

        assert_eq!(titles(&digest.best), vec!["post4", "post1", "post2", "post3"]);
    }

    #[test]
    fn test_best_is_bounded_subset_of_latest() {
        for len in 0..12u32 {
            let posts: Vec<Post> = (0..len)
                .map(|i| post(i, u64::from(i * 37 % 11), u64::from(i * 7 % 5)))
                .collect();

            let digest = Ranker::default().rank(posts);

            assert_eq!(digest.best.len(), (len as usize).min(5));
            assert_eq!(digest.latest.len(), len as usize);
            assert!(digest.best.iter().all(|p| digest.latest.contains(p)));
            assert!(
                digest
                    .best
                    .windows(2)
                    .all(|w| w[0].score(10) >= w[1].score(10))
            );
        }
    }

    #[test]
    fn test_custom_weights() {
        let posts = vec![post(1, 100, 1), post(2, 50, 10)];

        let digest = Ranker::new(1, 1).rank(posts);

        assert_eq!(titles(&digest.best), vec!["post1"]);
    }

    #[test]
    fn test_empty_input() {
        let digest = Ranker::default().rank(Vec::new());
        assert!(digest.best.is_empty());
        assert!(digest.latest.is_empty());
    }
}
