//! Page slicing.

use super::cursor::Cursor;
use crate::file::FileMetadata;

/// Number of files per page.
pub const PAGE_SIZE: usize = 100;

/// One page of files plus the cursor to continue from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Files in `(created_at, id)` order.
    pub items: Vec<FileMetadata>,
    /// Position of the last item, present only when more files follow.
    pub next_cursor: Option<Cursor>,
}

/// Order `files`, skip everything up to and including `cursor`, and cut a page.
///
/// One extra file beyond `page_size` is probed to decide whether a next cursor
/// is needed, so a page that ends exactly at the last file carries none.
pub fn paginate(mut files: Vec<FileMetadata>, cursor: Option<&Cursor>, page_size: usize) -> Page {
    files.sort_by(|a, b| {
        (a.created_at_millis(), a.id.as_str()).cmp(&(b.created_at_millis(), b.id.as_str()))
    });

    let mut items: Vec<FileMetadata> = files
        .into_iter()
        .filter(|f| cursor.map_or(true, |c| c.precedes(f)))
        .take(page_size + 1)
        .collect();

    let has_more = items.len() > page_size;
    items.truncate(page_size);

    let next_cursor = if has_more {
        items.last().map(Cursor::from_file)
    } else {
        None
    };

    Page { items, next_cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileId;
    use chrono::DateTime;

    const BASE_MILLIS: i64 = 1_674_371_236_440;

    fn file(millis: i64) -> FileMetadata {
        let ts = DateTime::from_timestamp_millis(millis).unwrap();
        FileMetadata {
            id: FileId::generate(),
            file_name: format!("test_{millis}.txt"),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn file_with_id(millis: i64, id: &str) -> FileMetadata {
        FileMetadata {
            id: FileId::parse(id).unwrap(),
            ..file(millis)
        }
    }

    /// Files with distinct timestamps, shuffled by reversing.
    fn files(count: i64) -> Vec<FileMetadata> {
        (0..count).rev().map(|i| file(BASE_MILLIS + i)).collect()
    }

    #[test]
    fn test_empty_set() {
        let page = paginate(vec![], None, PAGE_SIZE);
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_sorts_by_created_at() {
        let page = paginate(files(5), None, PAGE_SIZE);
        let millis: Vec<i64> = page.items.iter().map(|f| f.created_at_millis()).collect();
        assert_eq!(millis, (0..5).map(|i| BASE_MILLIS + i).collect::<Vec<_>>());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_next_cursor_when_next_page_exists() {
        let page = paginate(files(101), None, PAGE_SIZE);

        assert_eq!(page.items.len(), 100);
        let last = page.items.last().unwrap();
        assert_eq!(
            page.next_cursor.unwrap().encode(),
            format!("{}_{}", last.created_at_millis(), last.id)
        );
        assert_eq!(last.created_at_millis(), BASE_MILLIS + 99);
    }

    #[test]
    fn test_no_next_cursor_for_exactly_one_page() {
        let page = paginate(files(100), None, PAGE_SIZE);

        assert_eq!(page.items.len(), 100);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_cursor_resumes_strictly_after() {
        let all = files(150);
        let first = paginate(all.clone(), None, PAGE_SIZE);
        let second = paginate(all, first.next_cursor.as_ref(), PAGE_SIZE);

        assert_eq!(second.items.len(), 50);
        assert_eq!(second.items[0].created_at_millis(), BASE_MILLIS + 100);
        assert!(second.next_cursor.is_none());
    }

    #[test]
    fn test_ties_broken_by_id() {
        let a = file_with_id(BASE_MILLIS, "0000000000000000000000000000000a");
        let b = file_with_id(BASE_MILLIS, "000000000000000000000000000000b0");
        let c = file_with_id(BASE_MILLIS, "f0000000000000000000000000000000");

        for input in [
            vec![c.clone(), a.clone(), b.clone()],
            vec![b.clone(), c.clone(), a.clone()],
        ] {
            let page = paginate(input, None, PAGE_SIZE);
            assert_eq!(page.items, vec![a.clone(), b.clone(), c.clone()]);
        }
    }

    #[test]
    fn test_cursor_inside_tie_group() {
        let a = file_with_id(BASE_MILLIS, "0000000000000000000000000000000a");
        let b = file_with_id(BASE_MILLIS, "000000000000000000000000000000b0");
        let c = file_with_id(BASE_MILLIS + 1, "00000000000000000000000000000001");

        let page = paginate(
            vec![c.clone(), b.clone(), a.clone()],
            Some(&Cursor::from_file(&a)),
            PAGE_SIZE,
        );

        assert_eq!(page.items, vec![b, c]);
    }

    #[test]
    fn test_sub_millisecond_order_follows_cursor_resolution() {
        // Same millisecond, later instant but smaller id: id decides
        let base = DateTime::from_timestamp_millis(BASE_MILLIS).unwrap();
        let early = FileMetadata {
            created_at: base + chrono::Duration::microseconds(100),
            ..file_with_id(BASE_MILLIS, "ffffffffffffffffffffffffffffffff")
        };
        let late = FileMetadata {
            created_at: base + chrono::Duration::microseconds(900),
            ..file_with_id(BASE_MILLIS, "00000000000000000000000000000000")
        };

        let first = paginate(vec![early.clone(), late.clone()], None, 1);
        assert_eq!(first.items, vec![late]);

        let second = paginate(
            vec![early.clone(), first.items[0].clone()],
            first.next_cursor.as_ref(),
            1,
        );
        assert_eq!(second.items, vec![early]);
    }

    #[test]
    fn test_cursor_past_end() {
        let all = files(3);
        let cursor = Cursor::new(BASE_MILLIS + 10, FileId::generate());

        let page = paginate(all, Some(&cursor), PAGE_SIZE);

        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_cursor_of_deleted_file_still_resumes() {
        let all = files(5);
        let mut sorted = all.clone();
        sorted.sort_by_key(|f| f.created_at_millis());
        let removed = sorted.remove(2);

        let page = paginate(sorted, Some(&Cursor::from_file(&removed)), PAGE_SIZE);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].created_at_millis(), BASE_MILLIS + 3);
    }

    #[test]
    fn test_following_cursors_visits_every_file_once() {
        let mut all = files(250);
        // Add a tie group straddling the page boundary
        for _ in 0..10 {
            all.push(file(BASE_MILLIS + 99));
        }

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let page = paginate(all.clone(), cursor.as_ref(), PAGE_SIZE);
            seen.extend(page.items);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        let mut expected = all;
        expected.sort_by(|a, b| {
            (a.created_at_millis(), a.id.as_str()).cmp(&(b.created_at_millis(), b.id.as_str()))
        });
        assert_eq!(seen, expected);
    }
}
