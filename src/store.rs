use tracing::debug;

use crate::core::BookRecord;

/// 화면에 보여줄 도서 목록. 변경은 `list_loaded` / `record_added` 로만 한다.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<BookRecord>,
    loaded: bool,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 서버에서 받은 목록으로 교체
    pub fn list_loaded(&mut self, records: Vec<BookRecord>) {
        debug!("도서 목록 갱신: {} 권", records.len());
        self.books = records;
        self.loaded = true;
    }

    pub fn record_added(&mut self, record: BookRecord) {
        debug!("도서 추가: {} (id={})", record.title, record.id);
        self.books.push(record);
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn get(&self, id: &str) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn owned_by(&self, user_id: &str) -> Vec<&BookRecord> {
        self.books
            .iter()
            .filter(|b| b.owner_id.as_deref() == Some(user_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
