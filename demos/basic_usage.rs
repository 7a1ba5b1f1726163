//! Basic usage example for the mattang library
//!
//! This example demonstrates:
//! - Outlining groups of languages that share a feature value
//! - Scoring candidate subgroups from an innovation table
//! - Ranking every subgroup the table attests
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to see repairs.

use mattang::{
    isoglosses_for_feature, FeatureIndex, FeatureTable, IsoglossConfig, LanguageRecord,
    DEFAULT_STRICTNESS,
};

const INNOVATIONS: &str = "Innovation\tMota\tMwotlap\tVera'a\tHiw\tLo-Toga\n\
                           loss_of_final_vowel\t0\t1\t1\t1\t1\n\
                           q_to_k\t1\t1\t0\t0\t0\n\
                           velar_fronting\t0\t0\t0\t1\t1\n\
                           n_to_l\t0\t1\t1\t0\t0\n\
                           t_to_r\t1\t0\t0\t0\t0\n";

fn main() -> mattang::Result<()> {
    env_logger::init();

    println!("Isoglosses");
    println!("==========");

    let records = vec![
        LanguageRecord::new("Mota", 167.67, -13.85).with_feature("article", "na"),
        LanguageRecord::new("Mwotlap", 167.65, -13.65).with_feature("article", "na"),
        LanguageRecord::new("Vera'a", 167.50, -13.88).with_feature("article", "na"),
        LanguageRecord::new("Hiw", 166.60, -13.12).with_feature("article", "none"),
        LanguageRecord::new("Lo-Toga", 166.64, -13.35).with_feature("article", "none"),
    ];

    let config = IsoglossConfig::new().with_padding(0.05).with_roundedness(40);
    for outline in isoglosses_for_feature(&records, "article", &config)? {
        println!(
            "article = {:<5} {} languages, {} boundary segments",
            outline.value,
            outline.languages,
            outline.isogloss.edges().len()
        );
    }

    println!();
    println!("Subgroups");
    println!("=========");

    let index = FeatureIndex::build(&FeatureTable::from_tsv_str(INNOVATIONS)?)?;
    for score in index.rank_subgroups(DEFAULT_STRICTNESS)? {
        println!(
            "{:<32} ε = {}  p = {}  q = {}  κ = {:.2}  ς = {:.2}",
            score.languages.join(", "),
            score.exclusive,
            score.supporting,
            score.conflicting,
            score.cohesiveness,
            score.subgroupiness
        );
    }

    Ok(())
}
