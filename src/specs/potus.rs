// src/specs/potus.rs
//! Scraping *spec* for the salary/election source (www.potus.com).
//!
//! Record shapes:
//! - `subdirectories` → ordered `(raw name, href)` pairs from the linked-image
//!   listing. Names use this site's spelling; the reconciler maps them onto
//!   the biographical source's identifiers.
//! - `salary` → raw text of the labeled salary paragraph.
//! - `election_results` → per election year, ordered `(candidate, votes)` rows.

use scraper::Html;

use super::{find_text_parent, sel, text_of};
use crate::error::Error;

/// One candidate's raw vote strings in one election year. Popular votes are
/// absent from the 3-column tables used before they were tabulated.
#[derive(Clone, Debug, PartialEq)]
pub struct RawVotes {
    pub popular: Option<String>,
    pub electoral: Option<String>,
}

/// The listing tile we drop: it links a facts section, not a president.
const NON_PRESIDENT_ENTRY: &str = "Facts About the Presidents";

/// Parse the fixed listing of linked images. The image alt text encodes
/// "President <name>, <years>"; the name segment minus the title prefix is
/// the raw key.
pub fn subdirectories(doc: &Html) -> Result<Vec<(String, String)>, Error> {
    let mut out = Vec::new();
    for a in doc.select(&sel(r#"a[target="_self"]"#)) {
        let Some(img) = a.select(&sel("img")).next() else { continue };
        let Some(alt) = img.value().attr("alt") else { continue };
        let Some(href) = a.value().attr("href") else { continue };

        let titled = alt.split(',').next().unwrap_or("").trim();
        let name = titled.strip_prefix("President ").unwrap_or(titled);
        if name.is_empty() || name == NON_PRESIDENT_ENTRY {
            continue;
        }
        out.push((s!(name), s!(href)));
    }
    if out.is_empty() {
        return Err(Error::Discovery(s!("president image listing not found")));
    }
    Ok(out)
}

/// Locate the labeled salary paragraph and return its full raw text. Label
/// variants come from the quirks table (one president's page carries trailing
/// whitespace inside the label).
pub fn salary(doc: &Html, entity: &str, labels: &[&str]) -> Result<String, Error> {
    for label in labels {
        if let Some(p) = find_text_parent(doc, label, "p") {
            return Ok(text_of(p));
        }
    }
    Err(Error::extraction(entity, "salary paragraph"))
}

/// Parse the election-results section: one table per election year, the year
/// in the labeled header row, one data row per candidate. The column layout
/// is keyed off the header of the *first* table of the section — 3 columns
/// means the popular-votes column does not exist on this page. Rows without
/// a linked candidate cell are header/spacer rows and are skipped.
pub fn election_results(
    doc: &Html,
    entity: &str,
) -> Result<Vec<(String, Vec<(String, RawVotes)>)>, Error> {
    let section = find_text_parent(doc, "Presidential Election Results:", "div")
        .ok_or_else(|| Error::extraction(entity, "election results section"))?;

    let header_columns = section
        .select(&sel("tr"))
        .next()
        .map(|tr| tr.select(&sel("th")).count())
        .unwrap_or(0);
    let has_popular = header_columns != 3;

    let mut results = Vec::new();
    for table in section.select(&sel("table")) {
        let year = table
            .select(&sel("tr.row-2 a"))
            .next()
            .map(|a| text_of(a).trim().to_string())
            .ok_or_else(|| Error::extraction(entity, "election year header"))?;

        let mut rows = Vec::new();
        for tr in table.select(&sel("tr")) {
            let Some(candidate) = tr.select(&sel("td.column-2 a")).next() else {
                continue;
            };
            let candidate = text_of(candidate).trim().to_string();
            let col3 = tr
                .select(&sel("td.column-3"))
                .next()
                .map(|td| text_of(td).trim().to_string());
            let col4 = tr
                .select(&sel("td.column-4"))
                .next()
                .map(|td| text_of(td).trim().to_string());

            let votes = if has_popular {
                RawVotes { popular: col3, electoral: col4 }
            } else {
                RawVotes { popular: None, electoral: col3 }
            };
            rows.push((candidate, votes));
        }
        results.push((year, rows));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_PAGE: &str = r#"<html><body>
      <a target="_self" href="/facts/"><img alt="Facts About the Presidents"></a>
      <a target="_self" href="/george-washington/">
        <img alt="President George Washington, 1789-1797"></a>
      <a target="_self" href="/grover-cleveland/">
        <img alt="President Grover Cleveland, 1885-1889"></a>
      <a href="/not-self/"><img alt="President Nobody, 1900"></a>
    </body></html>"#;

    const SALARY_PAGE: &str = r#"<html><body>
      <p><strong>Presidential Salary:</strong> $50,000/year</p>
    </body></html>"#;

    const ELECTION_PAGE: &str = r#"<html><body><div>
      <p>Presidential Election Results:</p>
      <table>
        <tr class="row-1"><th>Year</th><th>Candidate</th>
            <th>Popular Votes</th><th>Electoral Votes</th></tr>
        <tr class="row-2"><td class="column-1"><a href="/1884/">1884</a></td></tr>
        <tr><td class="column-1"></td>
            <td class="column-2"><a href="/c/">Grover Cleveland</a></td>
            <td class="column-3">4,914,482</td>
            <td class="column-4">219</td></tr>
        <tr><td class="column-1"></td>
            <td class="column-2"><a href="/b/">James Blaine</a></td>
            <td class="column-3">4,856,903</td>
            <td class="column-4">182</td></tr>
      </table>
    </div></body></html>"#;

    const EARLY_ELECTION_PAGE: &str = r#"<html><body><div>
      <p>Presidential Election Results:</p>
      <table>
        <tr class="row-1"><th>Year</th><th>Candidate</th><th>Electoral Votes</th></tr>
        <tr class="row-2"><td class="column-1"><a href="/1789/">1789</a></td></tr>
        <tr><td class="column-1"></td>
            <td class="column-2"><a href="/w/">George Washington</a></td>
            <td class="column-3">69</td></tr>
      </table>
    </div></body></html>"#;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn discovery_strips_title_and_drops_facts_entry() {
        let subs = subdirectories(&doc(LISTING_PAGE)).unwrap();
        assert_eq!(
            subs,
            vec![
                (s!("George Washington"), s!("/george-washington/")),
                (s!("Grover Cleveland"), s!("/grover-cleveland/")),
            ]
        );
    }

    #[test]
    fn discovery_fails_on_unrecognized_listing() {
        let err = subdirectories(&doc("<html><body></body></html>")).unwrap_err();
        assert!(matches!(err, Error::Discovery(_)));
    }

    #[test]
    fn salary_returns_whole_paragraph_text() {
        let text = salary(&doc(SALARY_PAGE), "X", &["Presidential Salary:"]).unwrap();
        assert_eq!(text, "Presidential Salary: $50,000/year");
    }

    #[test]
    fn salary_tries_label_variants_in_order() {
        let page = r#"<p><strong>Presidential Salary: </strong>$25,000/year</p>"#;
        let err = salary(&doc(page), "X", &["Presidential Salary:"]).unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));

        let text = salary(
            &doc(page),
            "X",
            &["Presidential Salary:", "Presidential Salary: "],
        )
        .unwrap();
        assert_eq!(text, "Presidential Salary: $25,000/year");
    }

    #[test]
    fn four_column_table_reads_both_vote_kinds() {
        let results = election_results(&doc(ELECTION_PAGE), "X").unwrap();
        assert_eq!(results.len(), 1);
        let (year, rows) = &results[0];
        assert_eq!(year, "1884");
        assert_eq!(
            rows[0],
            (
                s!("Grover Cleveland"),
                RawVotes {
                    popular: Some(s!("4,914,482")),
                    electoral: Some(s!("219")),
                }
            )
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn three_column_table_has_no_popular_votes() {
        let results = election_results(&doc(EARLY_ELECTION_PAGE), "X").unwrap();
        let (year, rows) = &results[0];
        assert_eq!(year, "1789");
        assert_eq!(
            rows[0],
            (
                s!("George Washington"),
                RawVotes { popular: None, electoral: Some(s!("69")) }
            )
        );
    }

    #[test]
    fn missing_section_is_an_extraction_error() {
        let err = election_results(&doc("<html><body></body></html>"), "X").unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
