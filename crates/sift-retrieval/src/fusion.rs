// Reciprocal Rank Fusion (RRF) over multiple ranked document lists.

use std::collections::HashMap;

use sift_core::Document;

/// Standard RRF k parameter from the original paper:
/// "Reciprocal Rank Fusion outperforms Condorcet and individual Rank
/// Learning Methods" — Cormack, Clarke & Buettcher (SIGIR 2009).
///
/// Smaller k emphasizes top ranks; larger k flattens the weighting.
pub const RRF_K: f32 = 60.0;

struct Fused {
    doc: Document,
    score: f32,
}

/// Fuse ranked lists with RRF: each document accumulates
/// `Σᵢ 1/(k + rankᵢ)` over the lists it appears in (ranks 1-indexed).
///
/// Documents are identified by their text fingerprint (leading 100
/// chars); the first occurrence wins and later duplicates only add
/// score. Ties are broken by first occurrence: accumulation preserves
/// insertion order and the final sort is stable.
///
/// The result carries the fused score in `Document::score` and is
/// truncated to `top_k`.
pub fn reciprocal_rank_fusion(lists: &[Vec<Document>], k: f32, top_k: usize) -> Vec<Document> {
    let mut order: Vec<Fused> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for list in lists {
        for (rank, doc) in list.iter().enumerate() {
            let contribution = 1.0 / (k + (rank + 1) as f32);
            let fp = doc.fingerprint();
            match index.get(&fp) {
                Some(&i) => order[i].score += contribution,
                None => {
                    index.insert(fp, order.len());
                    order.push(Fused {
                        doc: doc.clone(),
                        score: contribution,
                    });
                }
            }
        }
    }

    // Stable sort: equal scores keep first-occurrence order.
    order.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    order
        .into_iter()
        .take(top_k)
        .map(|f| {
            let mut doc = f.doc;
            doc.score = f.score;
            doc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new(text, 1.0)
    }

    #[test]
    fn top_in_every_list_stays_top() {
        // Doc A at rank 1 in both lists must fuse to rank 1.
        let a = vec![doc("alpha"), doc("beta")];
        let b = vec![doc("alpha"), doc("gamma")];

        let fused = reciprocal_rank_fusion(&[a, b], RRF_K, 10);
        assert_eq!(fused[0].text, "alpha");
    }

    #[test]
    fn duplicates_collapse_by_fingerprint() {
        let a = vec![doc("shared document text"), doc("only in a")];
        let b = vec![doc("shared document text"), doc("only in b")];

        let fused = reciprocal_rank_fusion(&[a, b], RRF_K, 10);
        assert_eq!(fused.len(), 3);
        let shared: Vec<_> = fused
            .iter()
            .filter(|d| d.text == "shared document text")
            .collect();
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        // Three lists, same doc at rank 1, a different doc at rank 2 each.
        let lists = vec![
            vec![doc("anchor"), doc("second-from-list-1")],
            vec![doc("anchor"), doc("second-from-list-2")],
            vec![doc("anchor"), doc("second-from-list-3")],
        ];

        let fused = reciprocal_rank_fusion(&lists, RRF_K, 10);
        assert_eq!(fused[0].text, "anchor");
        assert_eq!(fused[1].text, "second-from-list-1");
        assert_eq!(fused[2].text, "second-from-list-2");
        assert_eq!(fused[3].text, "second-from-list-3");
    }

    #[test]
    fn single_list_preserves_order() {
        let a = vec![doc("one"), doc("two"), doc("three")];
        let fused = reciprocal_rank_fusion(&[a], RRF_K, 10);
        let texts: Vec<_> = fused.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_inputs_fuse_to_empty() {
        let fused = reciprocal_rank_fusion(&[], RRF_K, 10);
        assert!(fused.is_empty());

        let fused = reciprocal_rank_fusion(&[vec![], vec![]], RRF_K, 10);
        assert!(fused.is_empty());
    }

    #[test]
    fn symmetric_ranks_score_equally() {
        // RRF uses ranks only, never the retriever's raw scores.
        let a = vec![Document::new("x", 100.0), Document::new("y", 0.01)];
        let b = vec![Document::new("y", 0.99), Document::new("x", 0.01)];

        let fused = reciprocal_rank_fusion(&[a, b], RRF_K, 10);
        let sx = fused.iter().find(|d| d.text == "x").unwrap().score;
        let sy = fused.iter().find(|d| d.text == "y").unwrap().score;
        assert!((sx - sy).abs() < 1e-4);
    }

    #[test]
    fn truncates_to_top_k() {
        let a = vec![doc("1"), doc("2"), doc("3"), doc("4")];
        let fused = reciprocal_rank_fusion(&[a], RRF_K, 2);
        assert_eq!(fused.len(), 2);
    }

    #[test]
    fn fused_score_replaces_retriever_score() {
        let a = vec![Document::new("x", 42.0)];
        let fused = reciprocal_rank_fusion(&[a], RRF_K, 10);
        assert!((fused[0].score - 1.0 / (RRF_K + 1.0)).abs() < 1e-6);
    }
}
