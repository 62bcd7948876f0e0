use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use helpdesk_domain::pagination::PageRequest;
use helpdesk_domain::user::UserRole;
use helpdesk_schema::{comments, otps, profiles, questions, users};

use crate::domain::repository::{
    CommentRepository, OtpRepository, ProfileRepository, QuestionRepository, UserRepository,
};
use crate::domain::types::{Comment, NewComment, NewQuestion, Otp, Profile, Question, User};
use crate::error::HelpdeskError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, HelpdeskError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, HelpdeskError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, HelpdeskError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("check email uniqueness")?;
        Ok(model.is_some())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, HelpdeskError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("check username uniqueness")?;
        Ok(model.is_some())
    }

    async fn create(&self, user: &User) -> Result<(), HelpdeskError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn activate(&self, id: Uuid) -> Result<(), HelpdeskError> {
        users::ActiveModel {
            id: Set(id),
            is_active: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("activate user")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), HelpdeskError> {
        users::Entity::delete_many()
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        role: UserRole::from_u8(model.role as u8).unwrap_or(UserRole::Normal),
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create(&self, otp: &Otp) -> Result<(), HelpdeskError> {
        otps::ActiveModel {
            id: Set(otp.id),
            user_id: Set(otp.user_id),
            code: Set(otp.code.clone()),
            created_at: Set(otp.created_at),
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(())
    }

    async fn find_latest(&self, user_id: Uuid) -> Result<Option<Otp>, HelpdeskError> {
        let model = otps::Entity::find()
            .filter(otps::Column::UserId.eq(user_id))
            .order_by_desc(otps::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest otp")?;
        Ok(model.map(otp_from_model))
    }
}

fn otp_from_model(model: otps::Model) -> Otp {
    Otp {
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        created_at: model.created_at,
    }
}

// ── Question repository ──────────────────────────────────────────────────────

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Clone)]
pub struct DbQuestionRepository {
    pub db: DatabaseConnection,
}

impl QuestionRepository for DbQuestionRepository {
    async fn create(&self, question: &NewQuestion) -> Result<Question, HelpdeskError> {
        let model = questions::ActiveModel {
            user_id: Set(question.user_id),
            title: Set(question.title.clone()),
            body: Set(question.body.clone()),
            file: Set(question.file.clone()),
            created_at: Set(question.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create question")?;
        Ok(question_from_model(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Question>, HelpdeskError> {
        let model = questions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find question by id")?;
        Ok(model.map(question_from_model))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Question>, HelpdeskError> {
        let models = questions::Entity::find()
            .order_by_desc(questions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent questions")?;
        Ok(models.into_iter().map(question_from_model).collect())
    }

    async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Vec<Question>, HelpdeskError> {
        let PageRequest { per_page, page } = page;
        let pattern = format!("%{}%", escape_like(query));
        let models = questions::Entity::find()
            .filter(
                Condition::any()
                    .add(Expr::col(questions::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(questions::Column::Body).ilike(pattern)),
            )
            .order_by_desc(questions::Column::CreatedAt)
            .offset(((page - 1) * per_page) as u64)
            .limit(per_page as u64)
            .all(&self.db)
            .await
            .context("search questions")?;
        Ok(models.into_iter().map(question_from_model).collect())
    }

    async fn update_content(&self, id: i32, title: &str, body: &str) -> Result<(), HelpdeskError> {
        questions::ActiveModel {
            id: Set(id),
            title: Set(title.to_owned()),
            body: Set(body.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update question content")?;
        Ok(())
    }

    async fn set_file(&self, id: i32, file: Option<String>) -> Result<(), HelpdeskError> {
        questions::ActiveModel {
            id: Set(id),
            file: Set(file),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set question file")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, HelpdeskError> {
        let result = questions::Entity::delete_many()
            .filter(questions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete question")?;
        Ok(result.rows_affected > 0)
    }
}

fn question_from_model(model: questions::Model) -> Question {
    Question {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        body: model.body,
        file: model.file,
        created_at: model.created_at,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, HelpdeskError> {
        let model = comments::ActiveModel {
            question_id: Set(comment.question_id),
            author_id: Set(comment.author_id),
            content: Set(comment.content.clone()),
            file: Set(comment.file.clone()),
            created_at: Set(comment.created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        Ok(comment_from_model(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, HelpdeskError> {
        let model = comments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find comment by id")?;
        Ok(model.map(comment_from_model))
    }

    async fn list_for_question(&self, question_id: i32) -> Result<Vec<Comment>, HelpdeskError> {
        let models = comments::Entity::find()
            .filter(comments::Column::QuestionId.eq(question_id))
            .order_by_desc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list comments for question")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }

    async fn file_paths_for_question(
        &self,
        question_id: i32,
    ) -> Result<Vec<String>, HelpdeskError> {
        let models = comments::Entity::find()
            .filter(comments::Column::QuestionId.eq(question_id))
            .filter(comments::Column::File.is_not_null())
            .all(&self.db)
            .await
            .context("list comment file paths")?;
        Ok(models.into_iter().filter_map(|m| m.file).collect())
    }

    async fn update_content(&self, id: i32, content: &str) -> Result<(), HelpdeskError> {
        comments::ActiveModel {
            id: Set(id),
            content: Set(content.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update comment content")?;
        Ok(())
    }

    async fn set_file(&self, id: i32, file: Option<String>) -> Result<(), HelpdeskError> {
        comments::ActiveModel {
            id: Set(id),
            file: Set(file),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set comment file")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, HelpdeskError> {
        let result = comments::Entity::delete_many()
            .filter(comments::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        question_id: model.question_id,
        author_id: model.author_id,
        content: model.content,
        file: model.file,
        created_at: model.created_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, HelpdeskError> {
        let model = profiles::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find profile")?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &Profile) -> Result<(), HelpdeskError> {
        profiles::ActiveModel {
            user_id: Set(profile.user_id),
            bio: Set(profile.bio.clone()),
            picture: Set(profile.picture.clone()),
        }
        .insert(&self.db)
        .await
        .context("create profile")?;
        Ok(())
    }

    async fn update(
        &self,
        user_id: Uuid,
        bio: Option<&str>,
        picture: Option<&str>,
    ) -> Result<(), HelpdeskError> {
        let mut am = profiles::ActiveModel {
            user_id: Set(user_id),
            ..Default::default()
        };
        if let Some(bio) = bio {
            am.bio = Set(Some(bio.to_owned()));
        }
        if let Some(picture) = picture {
            am.picture = Set(picture.to_owned());
        }
        am.update(&self.db).await.context("update profile")?;
        Ok(())
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        user_id: model.user_id,
        bio: model.bio,
        picture: model.picture,
    }
}
