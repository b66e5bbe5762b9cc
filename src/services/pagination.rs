//! # 페이지네이션
//!
//! 정렬된 결과를 고정 크기(5개) 페이지로 나눕니다.
//! 목록은 최신순이므로 "다음 페이지"는 더 오래된 글(Older),
//! "이전 페이지"는 더 최근 글(Newer)입니다.
//!
//! 범위를 벗어난 페이지 번호는 에러가 아니라 가장 가까운 페이지로 보정됩니다.

use serde::Deserialize;

/// 한 페이지에 보여줄 게시글 수
pub const PAGE_SIZE: i64 = 5;

/// `?page=N` 쿼리 파라미터
///
/// 숫자가 아닌 값(`?page=last`, `?page=`)도 400 에러 없이 받아서
/// 1페이지로 처리하기 위해 문자열로 받습니다.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// 요청된 페이지 번호 (해석할 수 없으면 1)
    pub fn number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// 전체 항목 수와 요청 페이지로 계산한 페이지 창(window)
///
/// `offset`/`limit`은 SQL의 `LIMIT ? OFFSET ?`에 그대로 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1부터 시작하는 현재 페이지 번호
    pub number: i64,
    /// 전체 페이지 수 (항목이 0개여도 1)
    pub total_pages: i64,
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// 페이지 창을 계산합니다. `requested`는 `[1, total_pages]` 범위로 보정됩니다.
    pub fn new(requested: i64, total_items: i64, page_size: i64) -> Self {
        let page_size = page_size.max(1);
        let total_items = total_items.max(0);
        let total_pages = ((total_items + page_size - 1) / page_size).max(1);
        let number = requested.clamp(1, total_pages);

        Self {
            number,
            total_pages,
            offset: (number - 1) * page_size,
            limit: page_size,
        }
    }

    /// 더 오래된 글이 있는 다음 페이지가 존재하는가
    pub fn has_older(&self) -> bool {
        self.number < self.total_pages
    }

    /// 더 최근 글이 있는 이전 페이지가 존재하는가
    pub fn has_newer(&self) -> bool {
        self.number > 1
    }

    /// 페이지가 둘 이상이라 이동 버튼이 필요한가
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// 한 페이지 분량의 항목과 페이지 정보
///
/// 항목은 DB에서 `LIMIT/OFFSET`으로 이미 잘라 온 것입니다.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}
