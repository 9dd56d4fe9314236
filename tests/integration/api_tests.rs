//! Page-level tests: the full router driven in-process over the memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_server::{
    api,
    models::{AuthorData, BookData, BookInstanceData, GenreData, InstanceStatus},
    repository::{CatalogStore, MemoryStore},
    services::Services,
    AppState,
};

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let services = Services::new(store.clone());
        let router = api::router(AppState::new(services));
        Self { router, store }
    }

    async fn send(&self, request: Request<Body>) -> Page {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Page {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(&self, uri: &str) -> Page {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, form: &str) -> Page {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn author(&self, first: &str, family: &str) -> Uuid {
        self.store
            .insert_author(&AuthorData {
                first_name: first.to_string(),
                family_name: family.to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
                date_of_death: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn genre(&self, name: &str) -> Uuid {
        self.store
            .insert_genre(&GenreData { name: name.to_string() })
            .await
            .unwrap()
            .id
    }

    async fn book(&self, title: &str, author_id: Uuid, genre_ids: Vec<Uuid>) -> Uuid {
        self.store
            .insert_book(&BookData {
                title: title.to_string(),
                author_id,
                summary: format!("Summary of {}", title),
                isbn: "9780000000000".to_string(),
                genre_ids,
            })
            .await
            .unwrap()
            .id
    }

    async fn copy(&self, book_id: Uuid, status: InstanceStatus) -> Uuid {
        self.store
            .insert_instance(&BookInstanceData {
                book_id,
                imprint: "Gollancz, 2016".to_string(),
                status,
                due_back: NaiveDate::from_ymd_opt(2024, 3, 5),
            })
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn test_root_redirects_to_catalog_home() {
    let app = TestApp::new();

    let page = app.get("/").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog"));

    let page = app.get("/catalog/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Local Library Home"));
}

#[tokio::test]
async fn test_home_shows_record_counts() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let genre = app.genre("Science Fiction").await;
    let book = app.book("Foundation", author, vec![genre]).await;
    app.copy(book, InstanceStatus::Available).await;
    app.copy(book, InstanceStatus::Loaned).await;

    let page = app.get("/catalog").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(r#"<span id="book-count">1</span>"#));
    assert!(page.body.contains(r#"<span id="bookinstance-count">2</span>"#));
    assert!(page.body.contains(r#"<span id="available-count">1</span>"#));
    assert!(page.body.contains(r#"<span id="author-count">1</span>"#));
    assert!(page.body.contains(r#"<span id="genre-count">1</span>"#));
    assert!(!page.body.contains("Error getting dynamic content"));
}

#[tokio::test]
async fn test_genre_create_redirects_and_reuses_existing_name() {
    let app = TestApp::new();

    let first = app.post("/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    let location = first.location.unwrap();
    assert!(location.starts_with("/catalog/genre/"));

    let second = app.post("/catalog/genre/create", "name=+Fantasy+").await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(second.location.as_deref(), Some(location.as_str()));

    assert_eq!(app.store.count_genres().await.unwrap(), 1);

    let detail = app.get(&location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Genre: Fantasy"));
}

#[tokio::test]
async fn test_invalid_form_is_redisplayed_without_saving() {
    let app = TestApp::new();

    let page = app.post("/catalog/genre/create", "name=").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Genre name required"));
    assert_eq!(app.store.count_genres().await.unwrap(), 0);

    let page = app
        .post(
            "/catalog/author/create",
            "first_name=Isaac&family_name=&date_of_birth=not-a-date",
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Family name must be specified"));
    assert!(page.body.contains("Invalid date of birth"));
    assert!(page.body.contains(r#"value="Isaac""#));
    assert_eq!(app.store.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_submitted_markup_is_stored_escaped() {
    let app = TestApp::new();

    let page = app.post("/catalog/genre/create", "name=%3CSci-Fi%3E").await;
    let location = page.location.unwrap();

    let genres = app.store.list_genres().await.unwrap();
    assert_eq!(genres[0].name, "&lt;Sci-Fi&gt;");

    let detail = app.get(&location).await;
    assert!(detail.body.contains("&lt;Sci-Fi&gt;"));
    assert!(!detail.body.contains("<Sci-Fi>"));
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    app.book("Foundation", author, vec![]).await;
    app.book("I, Robot", author, vec![]).await;

    let uri = format!("/catalog/author/{}/delete", author);
    let page = app.get(&uri).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(page.body.contains("I, Robot"));
    assert!(!page.body.contains(r#"name="authorid""#));

    let page = app.post(&uri, &format!("authorid={}", author)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(app.store.get_author(author).await.unwrap().is_some());
}

#[tokio::test]
async fn test_author_without_books_is_deleted() {
    let app = TestApp::new();
    let author = app.author("Ursula", "Le Guin").await;

    let uri = format!("/catalog/author/{}/delete", author);
    let page = app.get(&uri).await;
    assert!(page.body.contains(&format!(r#"name="authorid" value="{}""#, author)));

    let page = app.post(&uri, &format!("authorid={}", author)).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));
    assert!(app.store.get_author(author).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_page_for_missing_document_redirects_to_list() {
    let app = TestApp::new();

    let page = app
        .get(&format!("/catalog/genre/{}/delete", Uuid::new_v4()))
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/genres"));
}

#[tokio::test]
async fn test_update_keeps_identity() {
    let app = TestApp::new();
    let genre = app.genre("Poetyr").await;

    let uri = format!("/catalog/genre/{}/update", genre);
    let form = app.get(&uri).await;
    assert!(form.body.contains("Update Genre"));
    assert!(form.body.contains(r#"value="Poetyr""#));

    let page = app.post(&uri, "name=Poetry").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(format!("/catalog/genre/{}", genre)));

    let stored = app.store.get_genre(genre).await.unwrap().unwrap();
    assert_eq!(stored.name, "Poetry");
    assert_eq!(app.store.count_genres().await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_documents_are_not_found() {
    let app = TestApp::new();
    let missing = Uuid::new_v4();

    let page = app.get(&format!("/catalog/book/{}/update", missing)).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Book not found"));

    let page = app.get(&format!("/catalog/author/{}", missing)).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = app.get("/catalog/bookinstance/not-an-id").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let author = app.author("Isaac", "Asimov").await;
    let page = app
        .post(
            &format!("/catalog/book/{}/update", missing),
            &format!("title=Foundation&author={}&summary=Psychohistory&isbn=123", author),
        )
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.count_books().await.unwrap(), 0);
}

#[tokio::test]
async fn test_book_create_with_several_genres() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let scifi = app.genre("Science Fiction").await;
    let classic = app.genre("Classic").await;

    let page = app
        .post(
            "/catalog/book/create",
            &format!(
                "title=Foundation&author={}&summary=Psychohistory&isbn=9780553293357&genre={}&genre={}",
                author, scifi, classic
            ),
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let books = app.store.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].genre_ids, vec![scifi, classic]);
    assert_eq!(page.location, Some(format!("/catalog/book/{}", books[0].id)));

    let detail = app.get(&books[0].url()).await;
    assert!(detail.body.contains("Isaac Asimov"));
    assert!(detail.body.contains("Science Fiction"));
    assert!(detail.body.contains("There are no copies of this book in the library."));
}

#[tokio::test]
async fn test_invalid_book_form_keeps_genre_selection() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let scifi = app.genre("Science Fiction").await;
    let classic = app.genre("Classic").await;

    let page = app
        .post(
            "/catalog/book/create",
            &format!(
                "title=&author={}&summary=Psychohistory&isbn=123&genre={}",
                author, scifi
            ),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Title must not be empty"));
    assert!(page.body.contains(&format!(r#"value="{}" checked"#, scifi)));
    assert!(!page.body.contains(&format!(r#"value="{}" checked"#, classic)));
    assert!(page.body.contains(&format!(r#"value="{}" selected"#, author)));
    assert_eq!(app.store.count_books().await.unwrap(), 0);
}

#[tokio::test]
async fn test_book_with_copies_cannot_be_deleted() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let book = app.book("Foundation", author, vec![]).await;
    let copy = app.copy(book, InstanceStatus::Available).await;

    let uri = format!("/catalog/book/{}/delete", book);
    let page = app.post(&uri, &format!("bookid={}", book)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Gollancz, 2016"));
    assert!(app.store.get_book(book).await.unwrap().is_some());

    let page = app
        .post(
            &format!("/catalog/bookinstance/{}/delete", copy),
            &format!("instanceid={}", copy),
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/bookinstances"));

    let page = app.post(&uri, &format!("bookid={}", book)).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/books"));
    assert!(app.store.get_book(book).await.unwrap().is_none());
}

#[tokio::test]
async fn test_copy_create_and_detail() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let book = app.book("Foundation", author, vec![]).await;

    let page = app
        .post(
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Gnome+Press&status=Loaned&due_back=2024-03-05", book),
        )
        .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let detail = app.get(&page.location.unwrap()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Foundation"));
    assert!(detail.body.contains("Loaned"));
    assert!(detail.body.contains("Mar 5, 2024"));

    let page = app
        .post(
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Gnome+Press&status=Lost", book),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Invalid status"));
    assert_eq!(app.store.count_instances(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_lists_are_sorted() {
    let app = TestApp::new();
    let asimov = app.author("Isaac", "Asimov").await;
    app.author("Ursula", "Le Guin").await;
    app.author("Arthur", "Clarke").await;
    app.book("I, Robot", asimov, vec![]).await;
    app.book("Foundation", asimov, vec![]).await;

    let page = app.get("/catalog/authors").await;
    let asimov_at = page.body.find("Asimov, Isaac").unwrap();
    let clarke_at = page.body.find("Clarke, Arthur").unwrap();
    let le_guin_at = page.body.find("Le Guin, Ursula").unwrap();
    assert!(asimov_at < clarke_at && clarke_at < le_guin_at);

    let page = app.get("/catalog/books").await;
    assert!(page.body.find("Foundation").unwrap() < page.body.find("I, Robot").unwrap());
}

#[tokio::test]
async fn test_undecodable_form_body_is_bad_request() {
    let app = TestApp::new();

    let page = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/catalog/genre/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Fantasy"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.count_genres().await.unwrap(), 0);
}

#[tokio::test]
async fn test_genre_with_books_cannot_be_deleted() {
    let app = TestApp::new();
    let author = app.author("Isaac", "Asimov").await;
    let genre = app.genre("Science Fiction").await;
    app.book("Foundation", author, vec![genre]).await;

    let uri = format!("/catalog/genre/{}/delete", genre);
    let page = app.get(&uri).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(!page.body.contains(r#"name="genreid""#));

    let page = app.post(&uri, &format!("genreid={}", genre)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(app.store.get_genre(genre).await.unwrap().is_some());
}

#[tokio::test]
async fn test_rejected_dates_are_redisplayed_escaped() {
    let app = TestApp::new();

    let page = app
        .post(
            "/catalog/author/create",
            "first_name=Isaac&family_name=Asimov&date_of_birth=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E",
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Invalid date of birth"));
    assert!(!page.body.contains("<script>"));
    assert!(page.body.contains("&quot;&gt;&lt;script&gt;"));
    assert_eq!(app.store.count_authors().await.unwrap(), 0);

    let author = app.author("Isaac", "Asimov").await;
    let book = app.book("Foundation", author, vec![]).await;
    let page = app
        .post(
            "/catalog/bookinstance/create",
            &format!("book={}&imprint=Gnome&status=Loaned&due_back=%3Cscript%3E", book),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Invalid date"));
    assert!(!page.body.contains("<script>"));
    assert_eq!(app.store.count_instances(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_author_names_must_be_ascii_alphanumeric() {
    let app = TestApp::new();

    let page = app
        .post(
            "/catalog/author/create",
            "first_name=Jos%C3%A9&family_name=%D0%9F%D1%83%D1%88%D0%BA%D0%B8%D0%BD",
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name has non-alphanumeric characters"));
    assert!(page.body.contains("Family name has non-alphanumeric characters"));
    assert_eq!(app.store.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_update_of_missing_document_is_not_found() {
    let app = TestApp::new();
    let missing = Uuid::new_v4();

    let page = app
        .post(&format!("/catalog/genre/{}/update", missing), "name=")
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = app
        .post(&format!("/catalog/author/{}/update", missing), "first_name=&family_name=")
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = app
        .post(&format!("/catalog/book/{}/update", missing), "title=")
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = app
        .post(&format!("/catalog/bookinstance/{}/update", missing), "imprint=")
        .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}
