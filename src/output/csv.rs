use anyhow::Result;

use crate::scoring::{GiftScore, MinistryMatch};

pub fn gifts_to_csv(gifts: &[GiftScore]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["rank", "gift", "score"])?;
    for (idx, gift) in gifts.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            gift.gift.as_slug().to_string(),
            gift.score.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn matches_to_csv(matches: &[MinistryMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "ministry",
        "category",
        "score",
        "is_primary",
        "has_verified_skill",
        "growth_pathway",
        "why_matched",
    ])?;
    for m in matches {
        writer.write_record([
            m.ministry.to_string(),
            m.category.as_slug().to_string(),
            format!("{:.4}", m.score),
            m.is_primary.to_string(),
            m.has_verified_skill.to_string(),
            m.growth_pathway.clone().unwrap_or_default(),
            m.why_matched.clone(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
