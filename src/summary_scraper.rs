use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::{
    building::Building,
    text_manipulators::{extract_text, strip_non_digits},
};

/// What a building's summary box advertises: free offices and free area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub offices: u32,
    pub m2: u32,
}

/// Scrape the landing page for per-building availability summaries.
///
/// Each building has a link like `<a href="/cs/dum-scala/">` somewhere
/// before a `<p class="text-red">` block whose first two `<span>`s hold the
/// office count and the free area. Nothing in the markup groups the link
/// with its summary, so we walk the document in order and pair every
/// summary block with the nearest anchor seen before it. Blocks with no
/// usable anchor, an unknown slug, or fewer than two spans are skipped.
pub fn scrape_summaries(markup: &str) -> HashMap<Building, Availability> {
    let document = Html::parse_document(markup);
    let span_selector = Selector::parse("span").unwrap();

    let mut found = HashMap::new();
    let mut last_href: Option<String> = None;

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() == "a" {
            if let Some(href) = element.value().attr("href") {
                last_href = Some(href.to_owned());
            }
            continue;
        }
        if !is_summary_block(element) {
            continue;
        }
        let Some(building) = last_href.as_deref().and_then(Building::from_href) else {
            continue;
        };
        let spans: Vec<ElementRef> = element.select(&span_selector).collect();
        if spans.len() < 2 {
            continue;
        }
        let offices = strip_non_digits(&extract_text(spans[0])).parse::<u32>();
        let m2 = strip_non_digits(&extract_text(spans[1])).parse::<u32>();
        if let (Ok(offices), Ok(m2)) = (offices, m2) {
            found.insert(building, Availability { offices, m2 });
        }
    }

    found
}

fn is_summary_block(element: ElementRef) -> bool {
    element.value().name() == "p"
        && element
            .value()
            .attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|class| class == "text-red"))
}
