//! Ordered fallback chains for fields without a reliable label: price, owner,
//! and phone.
//!
//! Each chain is a list of locators tried left to right. A locator proposes at
//! most one candidate; the chain's validator decides whether it is accepted.
//! A rejected or missing candidate falls through to the next locator.

use carscrape_core::{Field, ListingRecord};
use scraper::{ElementRef, Html};

use crate::page::{
    sole_text, stripped_text, text_nodes, CELL, OWNER_CELL, PHONE_CELL, PRICE_ALTERNATE,
    PRICE_PRIMARY,
};

/// Maximum whitespace-separated tokens in a free-text price candidate.
pub const MAX_PRICE_TOKENS: usize = 3;
/// Minimum digit count in a free-text phone candidate.
pub const MIN_PHONE_DIGITS: usize = 7;
/// Owner names must be strictly shorter than this many characters.
pub const MAX_OWNER_CHARS: usize = 50;

/// What a locator can see of one parsed detail page.
pub struct PageContext<'a> {
    pub document: &'a Html,
    /// The seller contact block, when the page has one.
    pub contact: Option<ElementRef<'a>>,
    pub currency_marker: &'a str,
}

pub type Locator = fn(&PageContext<'_>) -> Option<String>;
pub type Validator = fn(&PageContext<'_>, &str) -> bool;

pub struct StrategyChain {
    pub field: Field,
    pub locators: &'static [(&'static str, Locator)],
    pub validator: Validator,
}

impl StrategyChain {
    /// First candidate accepted by the validator, with the locator name.
    #[must_use]
    pub fn resolve(&self, ctx: &PageContext<'_>) -> Option<(&'static str, String)> {
        self.locators.iter().find_map(|(name, locate)| {
            locate(ctx)
                .filter(|candidate| (self.validator)(ctx, candidate))
                .map(|candidate| (*name, candidate))
        })
    }

    /// Resolves the chain into `record` unless the field is already filled.
    /// Returns `true` when a value was stored.
    pub fn apply(&self, ctx: &PageContext<'_>, record: &mut ListingRecord) -> bool {
        if record.is_filled(self.field) {
            return false;
        }
        let Some((strategy, value)) = self.resolve(ctx) else {
            return false;
        };
        tracing::debug!(field = %self.field, strategy, value = %value, "strategy matched");
        record.set_if_empty(self.field, value)
    }
}

pub const PRICE: StrategyChain = StrategyChain {
    field: Field::Price,
    locators: &[
        ("price_primary_cell", price_primary_cell),
        ("price_alternate_cell", price_alternate_cell),
        ("price_class_cell", price_class_cell),
        ("currency_text", currency_text),
    ],
    validator: is_price,
};

pub const OWNER: StrategyChain = StrategyChain {
    field: Field::Owner,
    locators: &[("contact_first_row", contact_first_row)],
    validator: is_owner,
};

pub const PHONE: StrategyChain = StrategyChain {
    field: Field::Phone,
    locators: &[
        ("phone_cell", phone_cell),
        ("parenthesized_cell", parenthesized_cell),
        ("parenthesized_text", parenthesized_text),
    ],
    validator: is_phone,
};

/// Chains in resolution order.
pub const CHAINS: [&StrategyChain; 3] = [&PRICE, &OWNER, &PHONE];

fn price_primary_cell(ctx: &PageContext<'_>) -> Option<String> {
    ctx.document.select(&PRICE_PRIMARY).next().map(stripped_text)
}

fn price_alternate_cell(ctx: &PageContext<'_>) -> Option<String> {
    ctx.document.select(&PRICE_ALTERNATE).next().map(stripped_text)
}

fn price_class_cell(ctx: &PageContext<'_>) -> Option<String> {
    ctx.document
        .select(&CELL)
        .find(|td| {
            td.value()
                .classes()
                .any(|class| class.to_lowercase().contains("price"))
        })
        .map(stripped_text)
}

fn currency_text(ctx: &PageContext<'_>) -> Option<String> {
    text_nodes(ctx.document.root_element())
        .find(|text| {
            text.contains(ctx.currency_marker)
                && text.split_whitespace().count() <= MAX_PRICE_TOKENS
        })
        .map(|text| text.trim().to_owned())
}

fn is_price(ctx: &PageContext<'_>, candidate: &str) -> bool {
    !candidate.is_empty() && candidate.contains(ctx.currency_marker)
}

fn contact_first_row(ctx: &PageContext<'_>) -> Option<String> {
    ctx.contact?.select(&OWNER_CELL).next().map(stripped_text)
}

fn is_owner(ctx: &PageContext<'_>, candidate: &str) -> bool {
    !candidate.is_empty()
        && !candidate.contains(ctx.currency_marker)
        && candidate.chars().count() < MAX_OWNER_CHARS
}

fn phone_cell(ctx: &PageContext<'_>) -> Option<String> {
    ctx.contact?.select(&PHONE_CELL).next().map(stripped_text)
}

fn parenthesized_cell(ctx: &PageContext<'_>) -> Option<String> {
    ctx.contact?
        .select(&CELL)
        .find(|td| {
            sole_text(*td).is_some_and(|text| {
                has_parentheses(text) && text.chars().any(|c| c.is_ascii_digit())
            })
        })
        .map(stripped_text)
}

fn parenthesized_text(ctx: &PageContext<'_>) -> Option<String> {
    text_nodes(ctx.contact?)
        .find(|text| has_parentheses(text) && digit_count(text) >= MIN_PHONE_DIGITS)
        .map(|text| text.trim().to_owned())
}

fn is_phone(_ctx: &PageContext<'_>, candidate: &str) -> bool {
    !candidate.is_empty() && has_parentheses(candidate)
}

fn has_parentheses(text: &str) -> bool {
    text.contains('(') && text.contains(')')
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
#[path = "strategy_test.rs"]
mod tests;
