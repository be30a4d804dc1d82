use crate::controller::Controller;
use crate::handler::AppModule;
use crate::request::{BookTransformer, GetAllBookRequest};
use crate::response::BookPresenter;
use application::service::GetBookService;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: GetBookService,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new(BookTransformer, BookPresenter::new(module.pages().clone()))
                    .intake(GetAllBookRequest)
                    .try_handle(|dto| async move { module.database().get_all_books(dto).await })
                    .await
            }),
        )
    }
}

#[cfg(test)]
mod test {
    use application::service::{CreateBookService, CreateUserService, DeleteUserService};
    use application::transfer::{CreateBookDto, CreateUserDto, DeleteUserDto};
    use axum::http::StatusCode;
    use driver::database::InMemoryDatabase;
    use error_stack::Report;
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::route::test_support::{fetch, module};

    async fn author(db: &InMemoryDatabase, name: &str) -> Result<Uuid, Report<KernelError>> {
        db.create_user(CreateUserDto {
            name: name.to_string(),
        })
        .await
    }

    async fn book(
        db: &InMemoryDatabase,
        title: &str,
        summary: &str,
        author_id: Uuid,
    ) -> Result<Uuid, Report<KernelError>> {
        db.create_book(CreateBookDto {
            title: title.to_string(),
            summary: summary.to_string(),
            author_id,
        })
        .await
    }

    #[tokio::test]
    async fn empty_catalog_renders_empty_list() {
        let (status, body) = fetch(module(), "/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"<li class="book""#).count(), 0);
        assert!(body.contains("No books in the catalog yet."));
    }

    #[tokio::test]
    async fn lists_every_book() -> Result<(), Report<KernelError>> {
        let module = module();
        let db = module.database();
        let herbert = author(db, "Frank Herbert").await?;
        let le_guin = author(db, "Ursula K. Le Guin").await?;
        let titles = ["Dune", "The Dispossessed", "The Left Hand of Darkness"];
        book(db, titles[0], "Spice.", herbert).await?;
        book(db, titles[1], "Anarres.", le_guin).await?;
        book(db, titles[2], "Gethen.", le_guin).await?;

        let (status, body) = fetch(module.clone(), "/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"<li class="book""#).count(), titles.len());
        for title in titles {
            assert!(body.contains(&format!(r#"<h2 class="title">{title}</h2>"#)));
        }
        assert!(body.contains("by Ursula K. Le Guin"));
        assert!(body.contains("Anarres."));
        assert!(!body.contains("No books in the catalog yet."));
        Ok(())
    }

    #[tokio::test]
    async fn single_book_appears_exactly_once() -> Result<(), Report<KernelError>> {
        let module = module();
        let db = module.database();
        let author_id = author(db, "U1").await?;
        book(db, "Dune", "...", author_id).await?;

        let (status, body) = fetch(module.clone(), "/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("Dune").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleted_author_takes_books_off_the_list() -> Result<(), Report<KernelError>> {
        let module = module();
        let db = module.database();
        let leaving = author(db, "U").await?;
        let staying = author(db, "V").await?;
        book(db, "B1", "first", leaving).await?;
        book(db, "B2", "second", leaving).await?;
        book(db, "B3", "third", staying).await?;

        db.delete_user(DeleteUserDto { id: leaving }).await?;

        let (status, body) = fetch(module.clone(), "/books").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("B1"));
        assert!(!body.contains("B2"));
        assert!(body.contains("B3"));
        assert_eq!(body.matches(r#"<li class="book""#).count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn titles_are_escaped() -> Result<(), Report<KernelError>> {
        let module = module();
        let db = module.database();
        let author_id = author(db, "mallory").await?;
        book(db, "<b>Bold</b>", "<i>x</i>", author_id).await?;

        let (_, body) = fetch(module.clone(), "/books").await;
        assert!(body.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(!body.contains("<b>Bold</b>"));
        assert!(!body.contains("<i>x</i>"));
        Ok(())
    }
}
