use mongodb::bson::{doc, Document};
use serde::Deserialize;

/// Default page size for the explore listing.
pub const DEFAULT_LIMIT: i64 = 8;

/// Categories with dedicated filter values; everything else falls under "Others".
const NAMED_CATEGORIES: [&str; 3] = ["Painting", "Photography", "Digital Art"];

/// Raw query-string parameters of the explore endpoint. Everything arrives
/// as an optional string; parsing happens in [`ExplorePlan::build`].
#[derive(Debug, Default, Deserialize)]
pub struct ExploreParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A fully resolved store query: filter, sort and pagination window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorePlan {
    pub filter: Document,
    pub sort: Option<Document>,
    pub skip: u64,
    pub limit: i64,
}

impl ExplorePlan {
    /// Translate request parameters into a filter/sort/skip/limit spec.
    ///
    /// The listing only ever surfaces public artworks; category and search
    /// narrow the filter further. Page and limit fall back to 1 and 8 when
    /// they fail to parse as positive integers.
    pub fn build(params: &ExploreParams) -> Self {
        let mut filter = doc! { "visibility": "Public" };

        match params.category.as_deref() {
            None | Some("All") => {}
            Some("Others") => {
                filter.insert("category", doc! { "$nin": NAMED_CATEGORIES.to_vec() });
            }
            Some(category) => {
                filter.insert("category", category);
            }
        }

        if let Some(search) = params.search.as_deref() {
            if !search.is_empty() {
                filter.insert(
                    "$or",
                    vec![
                        doc! { "title": { "$regex": search, "$options": "i" } },
                        doc! { "artist.name": { "$regex": search, "$options": "i" } },
                    ],
                );
            }
        }

        let sort = match params.sort.as_deref() {
            Some("priceAsc") => Some(doc! { "price": 1 }),
            Some("priceDesc") => Some(doc! { "price": -1 }),
            _ => None,
        };

        let page = parse_positive(params.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(params.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);

        // Saturate rather than overflow on absurd page numbers; a
        // past-the-end skip just yields an empty page.
        Self {
            filter,
            sort,
            skip: page.saturating_sub(1).saturating_mul(limit) as u64,
            limit,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.parse::<i64>().ok()).filter(|v| *v > 0)
}

/// Page count for a result set: `ceil(total / limit)`.
pub fn total_pages(total: u64, limit: i64) -> u64 {
    let limit = limit.max(1) as u64;
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ExploreParams {
        let mut p = ExploreParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "search" => p.search = value,
                "category" => p.category = value,
                "sort" => p.sort = value,
                "page" => p.page = value,
                "limit" => p.limit = value,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn empty_params_give_public_filter_and_defaults() {
        let plan = ExplorePlan::build(&ExploreParams::default());
        assert_eq!(plan.filter, doc! { "visibility": "Public" });
        assert_eq!(plan.sort, None);
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn named_category_matches_exactly() {
        let plan = ExplorePlan::build(&params(&[("category", "Painting")]));
        assert_eq!(
            plan.filter,
            doc! { "visibility": "Public", "category": "Painting" }
        );
    }

    #[test]
    fn all_category_is_a_no_op() {
        let plan = ExplorePlan::build(&params(&[("category", "All")]));
        assert_eq!(plan.filter, doc! { "visibility": "Public" });
    }

    #[test]
    fn others_category_excludes_the_named_three() {
        let plan = ExplorePlan::build(&params(&[("category", "Others")]));
        assert_eq!(
            plan.filter,
            doc! {
                "visibility": "Public",
                "category": { "$nin": ["Painting", "Photography", "Digital Art"] },
            }
        );
    }

    #[test]
    fn search_matches_title_or_artist_name_case_insensitively() {
        let plan = ExplorePlan::build(&params(&[("search", "dusk")]));
        assert_eq!(
            plan.filter,
            doc! {
                "visibility": "Public",
                "$or": [
                    { "title": { "$regex": "dusk", "$options": "i" } },
                    { "artist.name": { "$regex": "dusk", "$options": "i" } },
                ],
            }
        );
    }

    #[test]
    fn empty_search_is_ignored() {
        let plan = ExplorePlan::build(&params(&[("search", "")]));
        assert_eq!(plan.filter, doc! { "visibility": "Public" });
    }

    #[test]
    fn sort_maps_price_directions() {
        let asc = ExplorePlan::build(&params(&[("sort", "priceAsc")]));
        assert_eq!(asc.sort, Some(doc! { "price": 1 }));

        let desc = ExplorePlan::build(&params(&[("sort", "priceDesc")]));
        assert_eq!(desc.sort, Some(doc! { "price": -1 }));

        let other = ExplorePlan::build(&params(&[("sort", "newest")]));
        assert_eq!(other.sort, None);
    }

    #[test]
    fn pagination_computes_skip_window() {
        let plan = ExplorePlan::build(&params(&[("page", "3"), ("limit", "8")]));
        assert_eq!(plan.skip, 16);
        assert_eq!(plan.limit, 8);
    }

    #[test]
    fn unparseable_page_and_limit_fall_back() {
        let plan = ExplorePlan::build(&params(&[("page", "abc"), ("limit", "-2")]));
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.limit, DEFAULT_LIMIT);

        let zero = ExplorePlan::build(&params(&[("page", "0")]));
        assert_eq!(zero.skip, 0);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let page = i64::MAX.to_string();
        let plan = ExplorePlan::build(&params(&[("page", page.as_str()), ("limit", "8")]));
        assert_eq!(plan.skip, i64::MAX as u64);
        assert_eq!(plan.limit, 8);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(20, 8), 3);
        assert_eq!(total_pages(16, 8), 2);
        assert_eq!(total_pages(0, 8), 0);
        assert_eq!(total_pages(1, 8), 1);
    }
}
