use crate::model::id::{ItemId, ReservationId, UserId};
use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub user_name: String,
    pub period: ReservationPeriod,
    pub status: ReservationStatus,
    pub reserved_at: DateTime<Utc>,
    pub item: ReservationItem,
}

#[derive(Debug)]
pub struct ReservationItem {
    pub item_id: ItemId,
    pub item_name: String,
    pub is_active: bool,
}

/// 予約期間。半開区間 [start_at, end_at) として扱う。
/// start_at < end_at を満たさない値では構築できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPeriod {
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
}

impl ReservationPeriod {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> AppResult<Self> {
        if start_at >= end_at {
            return Err(AppError::UnprocessableEntity(format!(
                "予約期間が不正です（開始 {start_at} >= 終了 {end_at}）。"
            )));
        }
        Ok(Self { start_at, end_at })
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    /// 2 つの半開区間が重なっているかどうか。
    /// 重ならない条件 e1 <= s2 || s1 >= e2 の否定なので、
    /// 終了時刻と開始時刻がちょうど接している場合は重ならない。
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_at < other.end_at && other.start_at < self.end_at
    }
}

/// 予約のライフサイクルを表すステータス。
/// ワイヤ上の表記は "PENDING" / "APPROVED" / "CANCELED" / "EXPIRED" の
/// 完全一致のみを受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Canceled,
    Expired,
}

impl ReservationStatus {
    pub fn from_wire(value: &str) -> AppResult<Self> {
        value
            .parse()
            .map_err(|_| AppError::InvalidStatusName(format!("不正なステータス名です: {value}")))
    }

    /// 現在のステータス self から requested への遷移を検証する。
    /// - APPROVED へは PENDING からのみ
    /// - CANCELED へは EXPIRED 以外から
    /// - EXPIRED へは PENDING からのみ（自動失効は行わない）
    /// - PENDING へ戻す遷移は存在しない
    pub fn ensure_transition(self, requested: Self) -> AppResult<()> {
        let allowed = match requested {
            Self::Approved => self == Self::Pending,
            Self::Canceled => self != Self::Expired,
            Self::Expired => self == Self::Pending,
            Self::Pending => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(AppError::InvalidStatusTransition(format!(
                "{self} の予約を {requested} に変更することはできません。"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
    }

    fn period(s: (u32, u32), e: (u32, u32)) -> ReservationPeriod {
        ReservationPeriod::new(at(s.0, s.1), at(e.0, e.1)).unwrap()
    }

    #[rstest]
    #[case(ReservationStatus::Pending, ReservationStatus::Approved, true)]
    #[case(ReservationStatus::Pending, ReservationStatus::Canceled, true)]
    #[case(ReservationStatus::Pending, ReservationStatus::Expired, true)]
    #[case(ReservationStatus::Pending, ReservationStatus::Pending, false)]
    #[case(ReservationStatus::Approved, ReservationStatus::Approved, false)]
    #[case(ReservationStatus::Approved, ReservationStatus::Canceled, true)]
    #[case(ReservationStatus::Approved, ReservationStatus::Expired, false)]
    #[case(ReservationStatus::Approved, ReservationStatus::Pending, false)]
    #[case(ReservationStatus::Canceled, ReservationStatus::Approved, false)]
    #[case(ReservationStatus::Canceled, ReservationStatus::Canceled, true)]
    #[case(ReservationStatus::Canceled, ReservationStatus::Expired, false)]
    #[case(ReservationStatus::Canceled, ReservationStatus::Pending, false)]
    #[case(ReservationStatus::Expired, ReservationStatus::Approved, false)]
    #[case(ReservationStatus::Expired, ReservationStatus::Canceled, false)]
    #[case(ReservationStatus::Expired, ReservationStatus::Expired, false)]
    #[case(ReservationStatus::Expired, ReservationStatus::Pending, false)]
    fn transition_table(
        #[case] current: ReservationStatus,
        #[case] requested: ReservationStatus,
        #[case] allowed: bool,
    ) {
        let res = current.ensure_transition(requested);
        if allowed {
            assert!(res.is_ok());
        } else {
            assert!(matches!(res, Err(AppError::InvalidStatusTransition(_))));
        }
    }

    #[rstest]
    #[case("PENDING", Some(ReservationStatus::Pending))]
    #[case("APPROVED", Some(ReservationStatus::Approved))]
    #[case("CANCELED", Some(ReservationStatus::Canceled))]
    #[case("EXPIRED", Some(ReservationStatus::Expired))]
    #[case("pending", None)]
    #[case("Approved", None)]
    #[case("CANCELLED", None)]
    #[case("", None)]
    fn status_wire_names_are_exact(#[case] wire: &str, #[case] expected: Option<ReservationStatus>) {
        match expected {
            Some(status) => assert_eq!(ReservationStatus::from_wire(wire).unwrap(), status),
            None => assert!(matches!(
                ReservationStatus::from_wire(wire),
                Err(AppError::InvalidStatusName(_))
            )),
        }
    }

    #[test]
    fn period_requires_start_before_end() {
        assert!(ReservationPeriod::new(at(10, 0), at(10, 0)).is_err());
        assert!(ReservationPeriod::new(at(11, 0), at(10, 0)).is_err());
        assert!(ReservationPeriod::new(at(10, 0), at(10, 1)).is_ok());
    }

    #[test]
    fn touching_periods_do_not_overlap() {
        let morning = period((10, 0), (11, 0));
        let noon = period((11, 0), (12, 0));
        assert!(!morning.overlaps(&noon));
        assert!(!noon.overlaps(&morning));
    }

    #[test]
    fn overlapping_periods_overlap_symmetrically() {
        let a = period((10, 0), (11, 0));
        let b = period((10, 59), (11, 30));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // 片方がもう片方を完全に含む場合
        let outer = period((9, 0), (13, 0));
        let inner = period((10, 0), (11, 0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
