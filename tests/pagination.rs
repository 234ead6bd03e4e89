use companion_admin::pagination::PageMarker::{Ellipsis, Page};
use companion_admin::pagination::{PageMarker, page_window};

fn pages(numbers: &[usize]) -> Vec<PageMarker> {
    numbers.iter().copied().map(Page).collect()
}

#[test]
fn short_ranges_have_no_ellipsis() {
    for total in 1..=7 {
        for current in 1..=total {
            let window = page_window(current, total);
            assert_eq!(window, pages(&(1..=total).collect::<Vec<_>>()));
            assert!(!window.contains(&Ellipsis));
        }
    }
}

#[test]
fn single_page() {
    assert_eq!(page_window(1, 1), vec![Page(1)]);
}

#[test]
fn seven_pages_is_the_last_plain_range() {
    assert_eq!(page_window(4, 7), pages(&[1, 2, 3, 4, 5, 6, 7]));
}

#[test]
fn eight_pages_at_start() {
    assert_eq!(page_window(1, 8), vec![Page(1), Page(2), Ellipsis, Page(8)]);
}

#[test]
fn eight_pages_in_middle() {
    assert_eq!(
        page_window(4, 8),
        vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(8)]
    );
}

#[test]
fn eight_pages_at_end() {
    assert_eq!(page_window(8, 8), vec![Page(1), Ellipsis, Page(7), Page(8)]);
}

#[test]
fn ten_pages() {
    assert_eq!(page_window(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
    assert_eq!(
        page_window(5, 10),
        vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
    );
    assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
}

#[test]
fn windows_never_repeat_pages() {
    for total in 8..=40 {
        for current in 1..=total {
            let window = page_window(current, total);
            let numbers: Vec<usize> = window
                .iter()
                .filter_map(|marker| match marker {
                    Page(page) => Some(*page),
                    Ellipsis => None,
                })
                .collect();

            assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]), "{window:?}");
            assert_eq!(window.first(), Some(&Page(1)));
            assert_eq!(window.last(), Some(&Page(total)));
            assert!(numbers.contains(&current));
            assert!(
                window
                    .windows(2)
                    .all(|pair| !(pair[0] == Ellipsis && pair[1] == Ellipsis))
            );
        }
    }
}
