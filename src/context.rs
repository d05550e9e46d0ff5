use actix_web::{self, FromRequest};
use std::future::{ready, Ready};

pub const USER_ID_HEADER: &str = "X-User-Id";

// Stand-in author id until the auth layer lands.
const MOCK_USER_ID: &str = "user_abc";

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: String,
}

impl FromRequest for UserInfo {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(MOCK_USER_ID)
            .to_string();
        ready(Ok(UserInfo { id }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    #[tokio::test]
    async fn test_header_overrides_mock_user() {
        let req = TestRequest::default().insert_header((USER_ID_HEADER, "user_42")).to_http_request();
        let info = UserInfo::from_request(&req, &mut actix_web::dev::Payload::None).await.unwrap();
        assert_eq!(info.id, "user_42");
    }

    #[tokio::test]
    async fn test_missing_header_falls_back() {
        let req = TestRequest::default().to_http_request();
        let info = UserInfo::from_request(&req, &mut actix_web::dev::Payload::None).await.unwrap();
        assert_eq!(info.id, MOCK_USER_ID);
    }
}
