//! 페이지 계산
//!
//! 페이지 번호는 1부터 시작합니다. 페이지 버튼 창은 기본적으로 창 크기 단위로
//! 정렬된 블록(1–10, 11–20, ...)이고, 부수 탐색 화면은 현재 페이지를 가운데에
//! 두는 창을 씁니다.

use std::ops::{Range, RangeInclusive};

/// 페이지 버튼 창 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWindow {
    /// 창 크기 단위 블록
    Block(usize),
    /// 현재 페이지 중심
    Centered(usize),
}

impl Default for PageWindow {
    fn default() -> Self {
        PageWindow::Block(10)
    }
}

/// 페이지 계산 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 현재 페이지 (결과가 없으면 1)
    pub current_page: usize,
    pub total_pages: usize,
    /// 현재 페이지에 해당하는 결과 인덱스 범위
    pub items: Range<usize>,
    /// 표시할 페이지 번호들
    pub window: Vec<usize>,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }
}

/// 전체 페이지 수 (결과가 없으면 0)
pub fn total_pages(result_len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    result_len.div_ceil(page_size)
}

fn window_range(current: usize, total: usize, window: PageWindow) -> RangeInclusive<usize> {
    match window {
        PageWindow::Block(size) => {
            let size = size.max(1);
            let start = (current - 1) / size * size + 1;
            let end = (start + size - 1).min(total);
            start..=end
        }
        PageWindow::Centered(size) => {
            let size = size.max(1);
            let mut start = current.saturating_sub(size / 2).max(1);
            let end = (start + size - 1).min(total);
            if end + 1 - start < size {
                start = (end + 1).saturating_sub(size).max(1);
            }
            start..=end
        }
    }
}

/// 결과 길이, 페이지 크기, 현재 페이지로 페이지 정보 계산
///
/// 현재 페이지는 `1..=total_pages` 범위로 보정됩니다.
pub fn paginate(
    result_len: usize,
    page_size: usize,
    current_page: usize,
    window: PageWindow,
) -> Pagination {
    let page_size = page_size.max(1);
    let total = total_pages(result_len, page_size);
    if total == 0 {
        return Pagination {
            current_page: 1,
            total_pages: 0,
            items: 0..0,
            window: Vec::new(),
        };
    }

    let current = current_page.clamp(1, total);
    let start = (current - 1) * page_size;
    let end = (start + page_size).min(result_len);

    Pagination {
        current_page: current,
        total_pages: total,
        items: start..end,
        window: window_range(current, total, window).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(45, 20), 3);
    }

    #[test]
    fn test_page_ranges() {
        let first = paginate(45, 20, 1, PageWindow::default());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, 0..20);
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = paginate(45, 20, 3, PageWindow::default());
        assert_eq!(last.items, 40..45);
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_result() {
        let p = paginate(0, 20, 4, PageWindow::default());
        assert!(p.is_empty());
        assert_eq!(p.items, 0..0);
        assert!(p.window.is_empty());
        assert!(!p.has_prev() && !p.has_next());
    }

    #[test]
    fn test_out_of_range_page_clamped() {
        assert_eq!(paginate(45, 20, 9, PageWindow::default()).current_page, 3);
        assert_eq!(paginate(45, 20, 0, PageWindow::default()).current_page, 1);
    }

    #[test]
    fn test_block_window() {
        // 25페이지
        let p = paginate(500, 20, 1, PageWindow::Block(10));
        assert_eq!(p.window, (1..=10).collect::<Vec<_>>());
        let p = paginate(500, 20, 10, PageWindow::Block(10));
        assert_eq!(p.window, (1..=10).collect::<Vec<_>>());
        let p = paginate(500, 20, 11, PageWindow::Block(10));
        assert_eq!(p.window, (11..=20).collect::<Vec<_>>());
        let p = paginate(500, 20, 23, PageWindow::Block(10));
        assert_eq!(p.window, (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_centered_window() {
        // 10페이지
        let p = paginate(200, 20, 1, PageWindow::Centered(5));
        assert_eq!(p.window, vec![1, 2, 3, 4, 5]);
        let p = paginate(200, 20, 6, PageWindow::Centered(5));
        assert_eq!(p.window, vec![4, 5, 6, 7, 8]);
        let p = paginate(200, 20, 10, PageWindow::Centered(5));
        assert_eq!(p.window, vec![6, 7, 8, 9, 10]);
        let p = paginate(40, 20, 2, PageWindow::Centered(5));
        assert_eq!(p.window, vec![1, 2]);
    }
}
