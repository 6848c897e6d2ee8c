use paste::paste;
use sea_orm_migration::prelude::*;

static CREATE_AT: &str = "DEFAULT CURRENT_TIMESTAMP";

macro_rules! index {
    ($manager:expr,$table:ident,$col:ident) => {
        paste! {
            $manager
            .create_index(
                Index::create()
                    .name(
                        concat!(
                            "idx-",
                            stringify!($table),
                            "-",
                            stringify!($col),
                        ).to_lowercase()
                    )
                    .table($table::Table)
                    .col($table::$col)
                    .to_owned(),
            )
            .await?;
        }
    };
}

macro_rules! pivot_index {
    ($manager:expr,$table:ident,$left:ident,$right:ident) => {
        $manager
            .create_index(
                Index::create()
                    .name(
                        concat!(
                            "idx-",
                            stringify!($table),
                            "-",
                            stringify!($left),
                            "-",
                            stringify!($right),
                        )
                        .to_lowercase(),
                    )
                    .table($table::Table)
                    .col($table::$left)
                    .col($table::$right)
                    .unique()
                    .to_owned(),
            )
            .await?;
    };
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Password,
    Kind,
    CreateAt,
}
#[derive(Iden)]
enum Professor {
    Table,
    Id,
    Formation,
    Experience,
    Price,
    PhotoUrl,
    VideoUrl,
    MeetingUrl,
    Location,
}
#[derive(Iden)]
enum Topic {
    Table,
    Id,
    Area,
    Name,
}
#[derive(Iden)]
enum ProfessorTopic {
    Table,
    Id,
    ProfessorId,
    TopicId,
}
#[derive(Iden)]
enum Calendar {
    Table,
    Id,
    ProfessorId,
    StartDate,
    EndDate,
}
#[derive(Iden)]
enum Advisory {
    Table,
    Id,
    ProfessorId,
    CalendarId,
    Duration,
    Topic,
    Kind,
    Area,
    Completed,
}
#[derive(Iden)]
enum Comment {
    Table,
    Id,
    StudentId,
    Text,
    Rating,
}
#[derive(Iden)]
enum Reservation {
    Table,
    Id,
    StudentId,
    CalendarId,
    AdvisoryId,
    CommentId,
    ReserveAt,
    Cancelled,
    Status,
}
#[derive(Iden)]
enum UserCompletedAdvisory {
    Table,
    Id,
    UserId,
    AdvisoryId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).text().not_null())
                    .col(ColumnDef::new(User::Email).text().not_null())
                    .col(ColumnDef::new(User::Phone).text().not_null().default(""))
                    .col(ColumnDef::new(User::Password).binary().not_null())
                    .col(ColumnDef::new(User::Kind).string().not_null())
                    .col(
                        ColumnDef::new(User::CreateAt)
                            .date_time()
                            .not_null()
                            .extra(CREATE_AT.to_string()),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Professor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professor::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor-user")
                            .from(Professor::Table, Professor::Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(Professor::Formation)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Professor::Experience)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Professor::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Professor::PhotoUrl).text().null())
                    .col(ColumnDef::new(Professor::VideoUrl).text().null())
                    .col(ColumnDef::new(Professor::MeetingUrl).text().null())
                    .col(ColumnDef::new(Professor::Location).text().null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Topic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Topic::Area).text().not_null().default(""))
                    .col(ColumnDef::new(Topic::Name).text().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(ProfessorTopic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessorTopic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessorTopic::ProfessorId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pivot-professor-topic")
                            .from(ProfessorTopic::Table, ProfessorTopic::ProfessorId)
                            .to(Professor::Table, Professor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(ProfessorTopic::TopicId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pivot-topic-professor")
                            .from(ProfessorTopic::Table, ProfessorTopic::TopicId)
                            .to(Topic::Table, Topic::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Calendar::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calendar::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Calendar::ProfessorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-calendar-professor")
                            .from(Calendar::Table, Calendar::ProfessorId)
                            .to(Professor::Table, Professor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Calendar::StartDate).date_time().not_null())
                    .col(ColumnDef::new(Calendar::EndDate).date_time().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Advisory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advisory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advisory::ProfessorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-advisory-professor")
                            .from(Advisory::Table, Advisory::ProfessorId)
                            .to(Professor::Table, Professor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(Advisory::CalendarId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-advisory-calendar")
                            .from(Advisory::Table, Advisory::CalendarId)
                            .to(Calendar::Table, Calendar::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Advisory::Duration)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Advisory::Topic).text().not_null().default(""))
                    .col(ColumnDef::new(Advisory::Kind).text().not_null().default(""))
                    .col(ColumnDef::new(Advisory::Area).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Advisory::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::StudentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-student")
                            .from(Comment::Table, Comment::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Comment::Text).text().not_null())
                    .col(ColumnDef::new(Comment::Rating).integer().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservation::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservation::StudentId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservation-student")
                            .from(Reservation::Table, Reservation::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(ColumnDef::new(Reservation::CalendarId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservation-calendar")
                            .from(Reservation::Table, Reservation::CalendarId)
                            .to(Calendar::Table, Calendar::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Reservation::AdvisoryId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservation-advisory")
                            .from(Reservation::Table, Reservation::AdvisoryId)
                            .to(Advisory::Table, Advisory::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Reservation::CommentId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reservation-comment")
                            .from(Reservation::Table, Reservation::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .col(
                        ColumnDef::new(Reservation::ReserveAt)
                            .date_time()
                            .not_null()
                            .extra(CREATE_AT.to_string()),
                    )
                    .col(
                        ColumnDef::new(Reservation::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservation::Status)
                            .text()
                            .not_null()
                            .default("not completed"),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(UserCompletedAdvisory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCompletedAdvisory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserCompletedAdvisory::UserId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pivot-user-advisory")
                            .from(UserCompletedAdvisory::Table, UserCompletedAdvisory::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(UserCompletedAdvisory::AdvisoryId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pivot-advisory-user")
                            .from(
                                UserCompletedAdvisory::Table,
                                UserCompletedAdvisory::AdvisoryId,
                            )
                            .to(Advisory::Table, Advisory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        index!(manager, User, Email);
        index!(manager, User, Kind);
        index!(manager, Calendar, ProfessorId);
        index!(manager, Advisory, ProfessorId);
        index!(manager, Advisory, CalendarId);
        index!(manager, Comment, StudentId);
        index!(manager, Reservation, StudentId);
        index!(manager, Reservation, CalendarId);
        pivot_index!(manager, ProfessorTopic, ProfessorId, TopicId);
        pivot_index!(manager, UserCompletedAdvisory, UserId, AdvisoryId);

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCompletedAdvisory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Advisory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Calendar::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfessorTopic::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Topic::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}
