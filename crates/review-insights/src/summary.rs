use shop_common::classifier::Share;
use shop_common::shop_api::LabelShare;

/// Convert a tally into wire form, naming each key with `name`.
pub fn label_shares<K: Copy>(shares: &[Share<K>], name: impl Fn(K) -> &'static str) -> Vec<LabelShare> {
    shares
        .iter()
        .map(|s| LabelShare {
            label: name(s.key).to_string(),
            count: s.count,
            percentage: s.percentage,
        })
        .collect()
}
