//! Page slicing

/// Rows on `page` (1-based) of `page_size` rows each.
///
/// Paging is opt-in: a `page` or `page_size` of 0 returns every row. Pages
/// past the end yield an empty slice; the upper bound is left to the caller
/// because it depends on how many rows survived filtering.
pub fn paginate_rows<T>(rows: Vec<T>, page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return rows;
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return Vec::new();
    }

    rows.into_iter().skip(start).take(page_size).collect()
}

/// Number of pages needed for `total` rows, never less than 1.
/// Unpaged views (`page_size == 0`) have a single page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_slice_bounds() {
        let rows: Vec<usize> = (0..23).collect();

        for page_size in 1..=25 {
            for page in 1..=30 {
                let start = ((page - 1) * page_size).min(rows.len());
                let end = (page * page_size).min(rows.len());
                let expected = rows[start..end].to_vec();
                assert_eq!(paginate_rows(rows.clone(), page, page_size), expected);
            }
        }
    }

    #[test]
    fn test_unset_page_or_size_returns_everything() {
        let rows = vec!['a', 'b', 'c'];
        assert_eq!(paginate_rows(rows.clone(), 0, 2), rows);
        assert_eq!(paginate_rows(rows.clone(), 2, 0), rows);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let rows = vec![1, 2, 3];
        assert!(paginate_rows(rows.clone(), 3, 2).is_empty());
        assert!(paginate_rows(rows, usize::MAX, usize::MAX).is_empty());
        assert!(paginate_rows(Vec::<u8>::new(), 1, 10).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(100, 7), 15);
        assert_eq!(page_count(50, 0), 1);
    }
}
