//! 로드 완료된 레코드 집합
//!
//! 정렬은 생성 시 한 번만 수행하며 이후 레코드는 변경되지 않습니다.

use std::collections::HashMap;

use super::record::{sort_records, HanjaRecord, RecordKey};

/// 정렬된 레코드와 식별자 조회 맵
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<HanjaRecord>,
    by_key: HashMap<RecordKey, usize>,
}

impl Dataset {
    /// 레코드를 정렬하고 식별자 맵 생성
    ///
    /// 식별자가 중복되면 정렬 순서상 첫 레코드를 조회 대상으로 둡니다.
    pub fn new(mut records: Vec<HanjaRecord>) -> Self {
        sort_records(&mut records);

        let mut by_key = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;
        // 역순으로 채워서 앞쪽 레코드가 남도록
        for (index, record) in records.iter().enumerate().rev() {
            if by_key.insert(record.key(), index).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::warn!("중복 식별자 {}건 발견", duplicates);
        }

        Self { records, by_key }
    }

    /// 정렬된 레코드 전체
    pub fn records(&self) -> &[HanjaRecord] {
        &self.records
    }

    pub fn get(&self, key: &RecordKey) -> Option<&HanjaRecord> {
        self.by_key.get(key).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
