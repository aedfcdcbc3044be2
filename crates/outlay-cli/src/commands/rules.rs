//! Category rule command implementations

use anyhow::{Context, Result};
use outlay_core::rules::CategoryRules;

pub fn cmd_categories_list(rules: &CategoryRules) -> Result<()> {
    println!();
    println!("🏷️  Category Rules");
    println!("   ─────────────────────────────────────────────────────────────");

    for rule in rules.rules() {
        if rule.keywords.is_empty() {
            println!("   {:15} (no keywords, fallback)", rule.category);
        } else {
            println!("   {:15} {}", rule.category, rule.keywords.join(", "));
        }
    }

    println!();
    println!("   Rules file: {}", rules.path().display());

    Ok(())
}

pub fn cmd_categories_add(mut rules: CategoryRules, category: &str, keyword: &str) -> Result<()> {
    let category = category.trim();
    let keyword = keyword.trim();
    if category.is_empty() || keyword.is_empty() {
        anyhow::bail!("Category and keyword must not be empty");
    }

    if rules.add_keyword(category, keyword) {
        rules.save().context("Failed to save rules file")?;
        println!(
            "✅ Added keyword '{}' to {}",
            keyword.to_lowercase(),
            category
        );
    } else {
        println!("Keyword '{}' is already on {}", keyword.to_lowercase(), category);
    }

    Ok(())
}

pub fn cmd_categories_remove(mut rules: CategoryRules, category: &str, keyword: &str) -> Result<()> {
    if rules.remove_keyword(category, keyword) {
        rules.save().context("Failed to save rules file")?;
        println!("✅ Removed keyword '{}' from {}", keyword.to_lowercase(), category);
    } else {
        println!("No keyword '{}' on {}", keyword.to_lowercase(), category);
    }

    Ok(())
}

pub fn cmd_categories_test(rules: &CategoryRules, description: &str) -> Result<()> {
    println!(
        "🏷️  '{}' would be categorized as: {}",
        description,
        rules.categorize(description)
    );
    Ok(())
}
