use anyhow::Context;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::models::{BookingRecord, BookingStatus, NewBooking};

/// Fixed width so that text order matches time order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const BOOKING_COLUMNS: &str =
    "id, customer_name, email, phone, event_date, service_name, message, status, created_at";

// ── Bookings ──

pub fn create_booking(conn: &mut Connection, booking: &NewBooking) -> anyhow::Result<i64> {
    let created_at = booking.created_at.format(TIMESTAMP_FORMAT).to_string();

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO bookings (customer_name, email, phone, event_date, service_name, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            booking.customer_name,
            booking.email,
            booking.phone,
            booking.event_date,
            booking.service_name,
            booking.message,
            booking.status.as_str(),
            created_at,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(id)
}

/// All bookings, newest first. Equal timestamps fall back to the id.
pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<BookingRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<BookingRecord>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes `status` verbatim and returns the number of rows touched.
/// An unknown id touches nothing and is not an error.
pub fn update_booking_status(conn: &Connection, id: i64, status: &str) -> anyhow::Result<usize> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status, id],
    )?;
    Ok(count)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<BookingRecord> {
    let id: i64 = row.get(0)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    let Some(status) = BookingStatus::parse(&status_str) else {
        anyhow::bail!("booking {id} has unrecognised status: {status_str}");
    };
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S"))
        .with_context(|| format!("booking {id} has unreadable created_at: {created_at_str}"))?;

    Ok(BookingRecord {
        id,
        customer_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        event_date: row.get(4)?,
        service_name: row.get(5)?,
        message: row.get(6)?,
        status,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::{Duration, SubsecRound, Utc};

    fn sample(name: &str, created_at: NaiveDateTime) -> NewBooking {
        NewBooking {
            customer_name: name.to_string(),
            email: format!("{}@contoh.id", name.to_lowercase()),
            phone: "0812000111".to_string(),
            event_date: "2025-08-17".to_string(),
            service_name: "Paket Wisuda".to_string(),
            message: String::new(),
            status: BookingStatus::New,
            created_at,
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut conn = db::init_db(":memory:").unwrap();
        let now = Utc::now().naive_utc().trunc_subsecs(6);

        let first = create_booking(&mut conn, &sample("Budi", now)).unwrap();
        let second = create_booking(&mut conn, &sample("Sari", now)).unwrap();
        assert!(second > first);

        let stored = get_booking_by_id(&conn, first).unwrap().unwrap();
        assert_eq!(stored.customer_name, "Budi");
        assert_eq!(stored.status, BookingStatus::New);
        assert_eq!(stored.created_at, now);
    }

    #[test]
    fn test_list_newest_first() {
        let mut conn = db::init_db(":memory:").unwrap();
        let base = Utc::now().naive_utc();

        let names = ["Ani", "Budi", "Citra", "Dewi"];
        for (i, name) in names.iter().enumerate() {
            create_booking(&mut conn, &sample(name, base + Duration::seconds(i as i64))).unwrap();
        }

        let listed: Vec<String> = list_bookings(&conn)
            .unwrap()
            .into_iter()
            .map(|b| b.customer_name)
            .collect();
        assert_eq!(listed, vec!["Dewi", "Citra", "Budi", "Ani"]);
    }

    #[test]
    fn test_list_ties_broken_by_id() {
        let mut conn = db::init_db(":memory:").unwrap();
        let same = Utc::now().naive_utc();

        let a = create_booking(&mut conn, &sample("Ani", same)).unwrap();
        let b = create_booking(&mut conn, &sample("Budi", same)).unwrap();

        let ids: Vec<i64> = list_bookings(&conn).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_subsecond_ordering() {
        let mut conn = db::init_db(":memory:").unwrap();
        let base = Utc::now().naive_utc();

        // inserted out of order on purpose
        create_booking(&mut conn, &sample("Later", base + Duration::milliseconds(250))).unwrap();
        create_booking(&mut conn, &sample("Earlier", base)).unwrap();

        let listed = list_bookings(&conn).unwrap();
        assert_eq!(listed[0].customer_name, "Later");
        assert_eq!(listed[1].customer_name, "Earlier");
    }

    #[test]
    fn test_update_status_changes_only_status() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();
        let before = get_booking_by_id(&conn, id).unwrap().unwrap();

        let touched = update_booking_status(&conn, id, "Completed").unwrap();
        assert_eq!(touched, 1);

        let after = get_booking_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(after.status, BookingStatus::Completed);
        assert_eq!(
            BookingRecord {
                status: BookingStatus::New,
                ..after
            },
            before
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();
        let before = list_bookings(&conn).unwrap();

        let touched = update_booking_status(&conn, id + 100, "Cancelled").unwrap();
        assert_eq!(touched, 0);
        assert_eq!(list_bookings(&conn).unwrap(), before);
    }

    #[test]
    fn test_free_text_status_is_not_masked() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();

        assert_eq!(update_booking_status(&conn, id, "Archived").unwrap(), 1);

        let err = list_bookings(&conn).unwrap_err().to_string();
        assert!(err.contains(&format!("booking {id}")));
        assert!(err.contains("Archived"));
        assert!(get_booking_by_id(&conn, id).is_err());
    }

    #[test]
    fn test_operator_label_status_is_readable() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();

        update_booking_status(&conn, id, "Dikonfirmasi").unwrap();
        let stored = get_booking_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_unreadable_created_at_is_an_error() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();
        conn.execute(
            "UPDATE bookings SET created_at = 'kemarin' WHERE id = ?1",
            params![id],
        )
        .unwrap();

        let err = get_booking_by_id(&conn, id).unwrap_err().to_string();
        assert!(err.contains("created_at"));
    }

    #[test]
    fn test_legacy_second_precision_timestamp_read() {
        let mut conn = db::init_db(":memory:").unwrap();
        let id = create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap();
        conn.execute(
            "UPDATE bookings SET created_at = '2025-06-01 08:30:00' WHERE id = ?1",
            params![id],
        )
        .unwrap();

        let stored = get_booking_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.created_at.to_string(), "2025-06-01 08:30:00");
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut conn = db::init_db(":memory:").unwrap();
        let now = Utc::now().naive_utc();
        let first = create_booking(&mut conn, &sample("Ani", now)).unwrap();
        conn.execute("DELETE FROM bookings WHERE id = ?1", params![first])
            .unwrap();

        let second = create_booking(&mut conn, &sample("Budi", now)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.db");
        let path = path.to_str().unwrap();

        let id = {
            let mut conn = db::init_db(path).unwrap();
            create_booking(&mut conn, &sample("Ani", Utc::now().naive_utc())).unwrap()
        };

        let conn = db::init_db(path).unwrap();
        let bookings = list_bookings(&conn).unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, id);
    }
}
