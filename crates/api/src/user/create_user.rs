use crate::shared::usecase::UseCase;
use nudge_domain::User;
use nudge_infra::NudgeContext;

/// Creates the `User` the first time someone with a valid session shows up
#[derive(Debug)]
pub struct CreateUserUseCase {
    pub email: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserAlreadyExists,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let email = self.email.trim().to_lowercase();
        if ctx.repos.users.find_by_email(&email).await.is_some() {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let user = User::new(email, ctx.sys.now());
        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(user),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::{now, setup};
    use crate::shared::usecase::execute;

    #[actix_web::main]
    #[test]
    async fn creates_user_with_normalized_email() {
        let ctx = setup().ctx;
        let usecase = CreateUserUseCase {
            email: " New@Example.com ".into(),
        };

        let user = execute(usecase, &ctx).await.unwrap();
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.created, now());
        assert!(ctx.repos.users.find(&user.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_existing_email() {
        let ctx = setup().ctx;
        let usecase = CreateUserUseCase {
            email: "new@example.com".into(),
        };
        assert!(execute(usecase, &ctx).await.is_ok());

        let usecase = CreateUserUseCase {
            email: "NEW@example.com".into(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::UserAlreadyExists)));
    }
}
