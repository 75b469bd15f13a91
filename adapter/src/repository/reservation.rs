use crate::database::{
    model::reservation::{ReservationPeriodRow, ReservationRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::{RentalLogId, ReservationId, UserId};
use kernel::model::reservation::{
    event::{CreateReservation, UpdateReservationStatus},
    Reservation, ReservationStatus,
};
use kernel::repository::reservation::{ReservationFilter, ReservationRepository};
use shared::config::ReservationConfig;
use shared::error::{AppError, AppResult};

const FIND_RESERVATION_SQL: &str = r#"
    SELECT
        r.reservation_id,
        r.user_id,
        u.user_name,
        r.item_id,
        i.item_name,
        i.is_active AS item_is_active,
        r.start_at,
        r.end_at,
        r.status,
        r.created_at AS reserved_at
    FROM reservations AS r
    INNER JOIN items AS i ON r.item_id = i.item_id
    INNER JOIN users AS u ON r.user_id = u.user_id
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
    policy: ReservationConfig,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の物品 ID をもつ物品が存在し、利用可能（is_active）か
        // - 予約するユーザーが存在するか
        // - 希望時間帯が APPROVED の予約と重なっていないか
        //
        // 上記のすべてを通過した場合、このブロック以降の処理に進む
        {
            //
            // ① 物品の存在確認 ＋ is_active チェック
            //
            let item_row: Option<(bool,)> =
                sqlx::query_as("SELECT is_active FROM items WHERE item_id = $1")
                    .bind(event.item_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let Some((is_active,)) = item_row else {
                return Err(AppError::EntityNotFound(format!(
                    "物品（{}）が見つかりませんでした。",
                    event.item_id
                )));
            };

            if !is_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "物品（{}）は現在利用できません（is_active = false）。",
                    event.item_id
                )));
            }

            //
            // ② 予約するユーザーの存在確認
            //
            let user_row: Option<(UserId,)> =
                sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
                    .bind(event.reserved_by)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            if user_row.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "ユーザー（{}）が見つかりませんでした。",
                    event.reserved_by
                )));
            }

            //
            // ③ 希望予約時間帯が承認済みの予約と重なっていないか確認
            //    対象の物品の APPROVED の予約をすべて取得し、
            //    半開区間の重なり判定にかける
            //
            let approved: Vec<ReservationPeriodRow> = sqlx::query_as(
                r#"
                    SELECT reservation_id, start_at, end_at
                    FROM reservations
                    WHERE item_id = $1 AND status = $2
                "#,
            )
            .bind(event.item_id)
            .bind(ReservationStatus::Approved.as_ref())
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let mut conflicting = Vec::new();
            for row in &approved {
                if row.period()?.overlaps(&event.period) {
                    conflicting.push(row.reservation_id);
                }
            }

            if !conflicting.is_empty() {
                if self.policy.reject_conflicting {
                    return Err(AppError::ReservationConflict(format!(
                        "物品（{}）は指定時間帯にすでに承認済みの予約が存在します。",
                        event.item_id
                    )));
                }
                tracing::warn!(
                    item_id = %event.item_id,
                    conflicting = ?conflicting,
                    "重複する承認済み予約がありますが、設定により予約を受け付けます"
                );
            }
        }

        // 予約処理を行う、すなわち reservations テーブルにレコードを追加する。
        // ステータスは必ず PENDING から始まる
        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, item_id, user_id, start_at, end_at, status)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reservation_id)
        .bind(event.item_id)
        .bind(event.reserved_by)
        .bind(event.period.start_at())
        .bind(event.period.end_at())
        .bind(ReservationStatus::Pending.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        // 監査ログを同一トランザクションで書き込む。
        // どちらか一方だけが残ることはない
        Self::record_rental_log(&mut tx, reservation_id, "予約を作成しました。", "CREATE").await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    // ステータス遷移を検証したうえで予約のステータスを更新する
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // 現在のステータスを行ロック付きで取得する
        let row: Option<(String,)> =
            sqlx::query_as("SELECT status FROM reservations WHERE reservation_id = $1 FOR UPDATE")
                .bind(event.reservation_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        let Some((status,)) = row else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                event.reservation_id
            )));
        };

        let current = status.parse::<ReservationStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "予約（{}）のステータス値が不正です: {status}",
                event.reservation_id
            ))
        })?;

        // 遷移が許可されていない場合はここでエラーになり、レコードは変更されない
        current.ensure_transition(event.requested_status)?;

        let res = sqlx::query("UPDATE reservations SET status = $1 WHERE reservation_id = $2")
            .bind(event.requested_status.as_ref())
            .bind(event.reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        Self::record_rental_log(
            &mut tx,
            event.reservation_id,
            &format!(
                "ユーザー（{}）がステータスを {current} から {} に変更しました。",
                event.requested_user, event.requested_status
            ),
            event.requested_status.as_ref(),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_by_id(event.reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "予約（{}）が見つかりませんでした。",
                    event.reservation_id
                ))
            })
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> =
            sqlx::query_as(&format!("{FIND_RESERVATION_SQL} WHERE r.reservation_id = $1"))
                .bind(reservation_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    // すべての予約情報を取得する。
    // users・items と INNER JOIN し、表示に必要な情報も一緒に抽出する。
    // 出力するレコードは、予約日の古い順に並べる
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> =
            sqlx::query_as(&format!("{FIND_RESERVATION_SQL} ORDER BY r.created_at ASC"))
                .fetch_all(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // ユーザー・物品・ステータスの条件で絞り込んで予約を取得する。
    // NULL の条件は無視されるため、任意の組み合わせで検索できる
    async fn find_by_filter(&self, filter: ReservationFilter) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            r#"
                {FIND_RESERVATION_SQL}
                WHERE ($1::uuid IS NULL OR r.user_id = $1)
                  AND ($2::uuid IS NULL OR r.item_id = $2)
                  AND ($3::text IS NULL OR r.status = $3)
                ORDER BY r.created_at ASC
            "#
        ))
        .bind(filter.reserved_by)
        .bind(filter.item_id)
        .bind(filter.status.map(|s| s.as_ref().to_string()))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}

impl ReservationRepositoryImpl {
    // create メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 予約操作の監査ログを同一トランザクション内で追記するための内部メソッド
    async fn record_rental_log(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
        log_message: &str,
        action: &str,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO rental_logs (rental_log_id, reservation_id, log_message, action)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(RentalLogId::new())
        .bind(reservation_id)
        .bind(log_message)
        .bind(action)
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No rental_logs record has been created".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        item::ItemRepositoryImpl, rental_log::RentalLogRepositoryImpl, user::UserRepositoryImpl,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use kernel::model::id::{ItemId, UserId};
    use kernel::model::item::event::CreateItem;
    use kernel::model::reservation::ReservationPeriod;
    use kernel::model::user::{
        event::{BlockUsers, CreateUser},
        UserStatus,
    };
    use kernel::repository::{
        item::ItemRepository, rental_log::RentalLogRepository, user::UserRepository,
    };

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
    }

    fn period(s: (u32, u32), e: (u32, u32)) -> ReservationPeriod {
        ReservationPeriod::new(at(s.0, s.1), at(e.0, e.1)).unwrap()
    }

    async fn register_user_and_item(db: &ConnectionPool) -> (UserId, ItemId) {
        let user = UserRepositoryImpl::new(db.clone())
            .create(CreateUser::new(
                "テストユーザー".into(),
                "test-user@example.com".into(),
                "password".into(),
            ))
            .await
            .unwrap();
        let item_id = ItemRepositoryImpl::new(db.clone())
            .create(CreateItem::new("プロジェクター".into(), "会議室用".into()))
            .await
            .unwrap();
        (user.user_id, item_id)
    }

    #[sqlx::test]
    async fn create_reservation_persists_pending_row_and_audit_log(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        let reservation_id = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 0), (11, 0)),
            ))
            .await
            .unwrap();

        let reservation = repo.find_by_id(reservation_id).await.unwrap().unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.reserved_by, user_id);
        assert_eq!(reservation.item.item_id, item_id);

        let logs = RentalLogRepositoryImpl::new(db)
            .find_by_reservation_id(reservation_id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "CREATE");
    }

    #[sqlx::test]
    async fn create_reservation_rejects_overlap_with_approved(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        let first = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 0), (11, 0)),
            ))
            .await
            .unwrap();
        repo.update_status(UpdateReservationStatus::new(
            first,
            ReservationStatus::Approved,
            user_id,
        ))
        .await
        .unwrap();

        // 承認済みの予約と重なる時間帯は拒否される
        let conflict = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 59), (11, 30)),
            ))
            .await;
        assert!(matches!(conflict, Err(AppError::ReservationConflict(_))));

        // 終了時刻と開始時刻がちょうど接している場合は重ならない
        let touching = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((11, 0), (12, 0)),
            ))
            .await;
        assert!(touching.is_ok());
    }

    #[sqlx::test]
    async fn pending_only_overlap_does_not_block_creation(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        // PENDING のままの予約は重複チェックの対象にならない
        repo.create(CreateReservation::new(
            item_id,
            user_id,
            period((10, 0), (11, 0)),
        ))
        .await
        .unwrap();

        let second = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 30), (11, 30)),
            ))
            .await;
        assert!(second.is_ok());
    }

    #[sqlx::test]
    async fn invalid_transition_leaves_status_unchanged(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        let reservation_id = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 0), (11, 0)),
            ))
            .await
            .unwrap();
        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            ReservationStatus::Approved,
            user_id,
        ))
        .await
        .unwrap();

        // APPROVED の予約を再度 APPROVED にはできない
        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                ReservationStatus::Approved,
                user_id,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidStatusTransition(_))));

        let reservation = repo.find_by_id(reservation_id).await.unwrap().unwrap();
        assert_eq!(reservation.status, ReservationStatus::Approved);

        // 失敗した遷移の監査ログは残らない（CREATE と APPROVED の 2 件のみ）
        let logs = RentalLogRepositoryImpl::new(db)
            .find_by_reservation_id(reservation_id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
    }

    #[sqlx::test]
    async fn expired_reservation_cannot_be_canceled(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        let reservation_id = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 0), (11, 0)),
            ))
            .await
            .unwrap();
        repo.update_status(UpdateReservationStatus::new(
            reservation_id,
            ReservationStatus::Expired,
            user_id,
        ))
        .await
        .unwrap();

        let res = repo
            .update_status(UpdateReservationStatus::new(
                reservation_id,
                ReservationStatus::Canceled,
                user_id,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidStatusTransition(_))));
    }

    #[sqlx::test]
    async fn failed_audit_log_write_rolls_back_reservation(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, item_id) = register_user_and_item(&db).await;
        let repo = ReservationRepositoryImpl::new(db.clone(), ReservationConfig::default());

        // 監査ログの書き込みを失敗させるため、テーブルを落としておく
        sqlx::query("DROP TABLE rental_logs")
            .execute(db.inner_ref())
            .await
            .unwrap();

        let res = repo
            .create(CreateReservation::new(
                item_id,
                user_id,
                period((10, 0), (11, 0)),
            ))
            .await;
        assert!(res.is_err());

        // ロールバックにより予約レコードも残っていない
        let reservations = repo.find_all().await.unwrap();
        assert!(reservations.is_empty());
    }

    #[sqlx::test]
    async fn block_updates_only_existing_users(pool: sqlx::PgPool) {
        let db = ConnectionPool::new(pool);
        let (user_id, _) = register_user_and_item(&db).await;
        let user_repo = UserRepositoryImpl::new(db.clone());

        let blocked = user_repo
            .block(BlockUsers::new(vec![user_id, UserId::new()]))
            .await
            .unwrap();
        assert_eq!(blocked, 1);

        let user = user_repo.find_current_user(user_id).await.unwrap().unwrap();
        assert_eq!(user.status, UserStatus::Blocked);
    }
}
