use std::fmt;

/// 화면 이동 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Profile,
    BookDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::BookDetail(id) => format!("/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 사용자에게 알림을 띄우고 화면을 전환하는 쪽 (터미널, 테스트 더블 등)
pub trait Presenter: Send + Sync {
    fn alert(&self, message: &str);

    fn navigate(&self, route: Route);
}
