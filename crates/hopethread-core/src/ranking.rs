//! Feed ordering and recommendation over persisted post signals.

use hopethread_schema::{FeedPost, PostSignal};

/// Highest empathy potential first; equal scores keep their input order.
pub fn rank_by_empathy(posts: &mut [FeedPost]) {
    posts.sort_by(|a, b| {
        b.signal
            .empathy_potential_score
            .total_cmp(&a.signal.empathy_potential_score)
    });
}

/// True if any target emotion is among the signal's scored emotions.
pub fn matches_target_emotions<S: AsRef<str>>(signal: &PostSignal, targets: &[S]) -> bool {
    targets
        .iter()
        .any(|target| signal.scores.contains_key(target.as_ref()))
}

/// Posts for a reader looking for the given emotions.
///
/// The top `limit` posts by empathy (excluding the reader's own) are taken
/// first and then filtered by emotion overlap, so fewer than `limit` posts
/// may come back.
pub fn recommend<S: AsRef<str>>(
    posts: &[FeedPost],
    targets: &[S],
    exclude_author: Option<&str>,
    limit: usize,
) -> Vec<FeedPost> {
    let excluded = exclude_author.unwrap_or("");
    let mut candidates: Vec<FeedPost> = posts
        .iter()
        .filter(|post| post.author_id != excluded)
        .cloned()
        .collect();
    rank_by_empathy(&mut candidates);
    candidates.truncate(limit);
    candidates.retain(|post| matches_target_emotions(&post.signal, targets));
    candidates
}

pub fn is_hope_thread(signal: &PostSignal, threshold: f64) -> bool {
    signal.empathy_potential_score >= threshold
}

pub fn needs_crisis_support(signal: &PostSignal) -> bool {
    signal.has_crisis
}
