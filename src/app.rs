//! 애플리케이션 상태와 명령 처리
//!
//! UI 계층(CLI 등)은 사용자 입력마다 이 모듈의 명령 메서드를 호출하고,
//! 화면에 그릴 내용은 [`AppState::view`]로 가져갑니다.
//!
//! - 필터 조건이 바뀌면 필터를 한 번 다시 실행하고 1페이지로 돌아갑니다.
//! - 페이지 이동은 필터를 다시 실행하지 않고 캐시된 결과만 다시 자릅니다.
//! - 즐겨찾기/기록/다크모드 변경은 메모리에 먼저 반영하고 바로 저장합니다.
//!   저장 실패는 [`Persisted::error`]로 알려주며 메모리 변경은 유지됩니다.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::config::AppConfig;
use crate::data::{Dataset, HanjaRecord, RecordKey};
use crate::search::{
    apply_indices, distinct_character_count, grade_label, paginate, radical, ChipKind, FilterChip,
    FilterCriteria, Pagination, RadicalIndex, RadicalSelection, SearchDebouncer, SyllableIndex,
};
use crate::store::{DarkMode, Favorites, HistoryEntry, KeyValueStore, Persisted, RecentHistory};

/// 급수 드롭다운의 "전체" 체크박스 값
pub const ALL_GRADES: &str = "all";

/// 결과 표의 한 행
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow<'a> {
    pub record: &'a HanjaRecord,
    pub is_favorite: bool,
}

/// 화면에 그릴 검색 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    /// 현재 페이지의 행
    pub rows: Vec<ResultRow<'a>>,
    /// 결과에 포함된 서로 다른 한자 수
    pub character_count: usize,
    /// 결과 행 수
    pub total_rows: usize,
    pub pagination: Pagination,
    pub chips: Vec<FilterChip>,
    /// 급수 드롭다운 라벨
    pub grade_label: String,
}

impl ResultView<'_> {
    /// 결과 없음 (로딩 중과 구분되는 빈 상태)
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

/// 기록 전체 삭제 결과
#[derive(Debug)]
pub enum ClearOutcome {
    /// 삭제할 기록 없음
    Empty,
    /// 사용자가 확인하지 않음
    Declined,
    Cleared(Persisted<()>),
}

/// 현재 시각 (epoch ms)
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// 단일 세션의 애플리케이션 상태
pub struct AppState {
    config: AppConfig,
    dataset: Dataset,
    syllables: SyllableIndex,
    radicals: RadicalIndex,
    criteria: FilterCriteria,
    /// 적용 전 급수 체크 상태
    pending_grades: Vec<String>,
    /// 필터 결과 (정렬된 레코드의 인덱스)
    filtered: Vec<usize>,
    current_page: usize,
    favorites: Favorites,
    recent: RecentHistory,
    dark_mode: DarkMode,
    debouncer: SearchDebouncer,
    store: Box<dyn KeyValueStore>,
}

impl AppState {
    /// 로드된 데이터와 저장소로 상태 생성
    ///
    /// 음절 캐시와 부수 목록은 여기서 한 번만 만듭니다.
    pub fn new(dataset: Dataset, store: Box<dyn KeyValueStore>, config: AppConfig) -> Self {
        let syllables = SyllableIndex::build(dataset.records());
        let radicals = RadicalIndex::build(dataset.records());
        let favorites = Favorites::load(&*store);
        let recent = RecentHistory::load(&*store, config.recent_capacity);
        let dark_mode = DarkMode::load(&*store);
        let debouncer = SearchDebouncer::from_millis(config.debounce_ms);

        let mut state = Self {
            config,
            dataset,
            syllables,
            radicals,
            criteria: FilterCriteria::new(),
            pending_grades: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            favorites,
            recent,
            dark_mode,
            debouncer,
            store,
        };
        state.refilter();
        log::info!(
            "상태 초기화: 레코드 {}개, 즐겨찾기 {}개, 기록 {}개",
            state.dataset.len(),
            state.favorites.len(),
            state.recent.len()
        );
        state
    }

    /// 필터 재실행 후 1페이지로
    fn refilter(&mut self) {
        self.filtered = apply_indices(self.dataset.records(), &self.criteria, &self.favorites);
        self.current_page = 1;
    }

    // ----- 검색어 -----

    /// 검색어 입력 (debounce 대기)
    pub fn input_search(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.input(text, now);
    }

    /// 타이머 틱. 대기 시간이 지난 검색어가 있으면 적용하고 true.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => {
                self.criteria.search = text;
                self.refilter();
                true
            }
            None => false,
        }
    }

    /// 검색어 즉시 적용
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.debouncer.cancel();
        self.criteria.search = text.into();
        self.refilter();
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    // ----- 단일 선택 필터 -----

    pub fn set_education(&mut self, education: impl Into<String>) {
        self.criteria.set_education(education);
        self.refilter();
    }

    pub fn set_length(&mut self, length: impl Into<String>) {
        self.criteria.set_length(length);
        self.refilter();
    }

    // ----- 급수 다중 선택 -----

    /// 체크박스 변경 (적용 전까지 필터에 반영되지 않음)
    pub fn check_grade(&mut self, grade: &str, checked: bool) {
        if grade == ALL_GRADES {
            self.pending_grades.clear();
        } else if checked {
            if !self.pending_grades.iter().any(|g| g == grade) {
                self.pending_grades.push(grade.to_string());
            }
        } else {
            self.pending_grades.retain(|g| g != grade);
        }
    }

    pub fn pending_grades(&self) -> &[String] {
        &self.pending_grades
    }

    /// 체크 상태 적용
    pub fn apply_grades(&mut self) {
        self.criteria.set_grades(self.pending_grades.iter().cloned());
        self.refilter();
    }

    /// 급수 선택 초기화
    pub fn reset_grades(&mut self) {
        self.pending_grades.clear();
        self.criteria.grades.clear();
        self.refilter();
    }

    /// 결과 행의 급수 배지 클릭: 해당 급수 하나만 선택
    pub fn filter_by_grade_badge(&mut self, grade: &str) {
        if grade.is_empty() || grade == "-" {
            return;
        }
        self.pending_grades = vec![grade.to_string()];
        self.criteria.set_grades([grade]);
        self.refilter();
    }

    /// 결과 행의 장단음 배지 클릭
    pub fn filter_by_length_badge(&mut self, length: &str) {
        if length.is_empty() || length == "없음" {
            return;
        }
        self.set_length(length);
    }

    /// 활성 필터 칩 제거
    pub fn remove_filter(&mut self, kind: ChipKind) {
        if kind == ChipKind::Grade {
            self.pending_grades.clear();
        }
        self.criteria.remove_chip(kind);
        self.refilter();
    }

    pub fn toggle_favorites_only(&mut self) -> bool {
        self.criteria.favorites_only = !self.criteria.favorites_only;
        self.refilter();
        self.criteria.favorites_only
    }

    // ----- 초성/음절 -----

    /// 초성 선택. 음절 선택은 해제되며 해당 초성의 음절 버튼 목록을 반환합니다.
    pub fn select_chosung(&mut self, chosung: Option<char>) -> Option<&[String]> {
        self.criteria.select_chosung(chosung);
        self.refilter();
        self.criteria
            .chosung()
            .and_then(|c| self.syllables.syllables(c))
    }

    /// 음절 버튼 클릭 (같은 음절을 다시 누르면 해제)
    pub fn select_syllable(&mut self, syllable: &str) -> Option<String> {
        let selected = self.criteria.select_syllable(syllable).map(str::to_string);
        self.refilter();
        selected
    }

    // ----- 페이지 -----

    fn total_pages(&self) -> usize {
        crate::search::total_pages(self.filtered.len(), self.config.page_size)
    }

    /// 페이지 이동 (필터는 다시 실행하지 않음)
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
        log::debug!("페이지 이동: {}", self.current_page);
    }

    pub fn change_page(&mut self, delta: isize) {
        let target = self.current_page.saturating_add_signed(delta);
        self.go_to_page(target);
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    // ----- 즐겨찾기 -----

    /// 즐겨찾기 전환 후 저장. 즐겨찾기만 보기 중이면 결과를 다시 계산합니다.
    pub fn toggle_favorite(&mut self, key: RecordKey) -> Persisted<bool> {
        let is_favorite = self.favorites.toggle(key);
        let saved = self.favorites.save(&mut *self.store);
        if self.criteria.favorites_only {
            self.refilter();
        }
        Persisted::new(is_favorite, saved)
    }

    pub fn is_favorite(&self, key: &RecordKey) -> bool {
        self.favorites.has(key)
    }

    // ----- 최근 기록 -----

    /// 레코드 링크 열기: 최근 기록에 추가 후 저장
    ///
    /// 식별자에 해당하는 레코드가 없으면 `None`.
    pub fn open_record(&mut self, key: &RecordKey, now_ms: u64) -> Option<Persisted<HistoryEntry>> {
        let record = self.dataset.get(key)?;
        let entry = self.recent.add(record, now_ms).clone();
        let saved = self.recent.save(&mut *self.store);
        Some(Persisted::new(entry, saved))
    }

    pub fn remove_recent(&mut self, index: usize) -> Persisted<Option<HistoryEntry>> {
        let removed = self.recent.remove(index);
        let saved = self.recent.save(&mut *self.store);
        Persisted::new(removed, saved)
    }

    /// 기록 전체 삭제. `confirm`은 기록 수를 받아 사용자 확인 여부를 반환합니다.
    pub fn clear_recent(&mut self, confirm: impl FnOnce(usize) -> bool) -> ClearOutcome {
        if self.recent.is_empty() {
            return ClearOutcome::Empty;
        }
        if !confirm(self.recent.len()) {
            return ClearOutcome::Declined;
        }
        self.recent.clear();
        let saved = self.recent.save(&mut *self.store);
        ClearOutcome::Cleared(Persisted::new((), saved))
    }

    // ----- 다크모드 -----

    pub fn toggle_dark_mode(&mut self) -> Persisted<bool> {
        let enabled = self.dark_mode.toggle();
        let saved = self.dark_mode.save(&mut *self.store);
        Persisted::new(enabled, saved)
    }

    // ----- 조회 -----

    /// 현재 페이지의 검색 결과
    pub fn view(&self) -> ResultView<'_> {
        let records = self.dataset.records();
        let pagination = paginate(
            self.filtered.len(),
            self.config.page_size,
            self.current_page,
            self.config.search_window(),
        );
        let rows = self.filtered[pagination.items.clone()]
            .iter()
            .map(|&index| {
                let record = &records[index];
                ResultRow {
                    record,
                    is_favorite: self.favorites.has(&record.key()),
                }
            })
            .collect();

        ResultView {
            rows,
            character_count: distinct_character_count(self.filtered.iter().map(|&i| &records[i])),
            total_rows: self.filtered.len(),
            pagination,
            chips: self.criteria.active_chips(),
            grade_label: grade_label(&self.criteria.grades),
        }
    }

    /// 부수 탐색 결과와 페이지
    pub fn radical_view(
        &self,
        selection: &RadicalSelection,
        page: usize,
    ) -> (Vec<ResultRow<'_>>, usize, Pagination) {
        let matched = radical::browse(self.dataset.records(), selection, &self.favorites);
        let pagination = paginate(
            matched.len(),
            self.config.radical_page_size,
            page,
            self.config.radical_window(),
        );
        let character_count = distinct_character_count(matched.iter().copied());
        let rows = matched[pagination.items.clone()]
            .iter()
            .map(|&record| ResultRow {
                record,
                is_favorite: self.favorites.has(&record.key()),
            })
            .collect();
        (rows, character_count, pagination)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn syllable_index(&self) -> &SyllableIndex {
        &self.syllables
    }

    pub fn radicals(&self) -> &RadicalIndex {
        &self.radicals
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn recent(&self) -> &RecentHistory {
        &self.recent
    }

    pub fn dark_mode(&self) -> DarkMode {
        self.dark_mode
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
