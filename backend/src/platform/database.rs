//! SQLite relational store: product catalogs, surveys, survey/product links, issued
//! short codes and the enumeration catalog.
//!
//! One connection is shared behind a mutex. Each method takes the lock for
//! the statements it runs and never holds it across an await.

use crate::error::SurveyError;
use chrono::Utc;
use common::model::enums::{EnumCatalog, EnumOption};
use common::model::product::Product;
use common::model::survey::{NewSurvey, Survey, SurveyProduct};
use log::warn;
use rand::distr::Alphanumeric;
use rand::Rng;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS products (
    id           TEXT PRIMARY KEY,
    user_id      TEXT NOT NULL,
    product_name TEXT NOT NULL,
    image_url    TEXT,
    created_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS products_user_id ON products (user_id);

CREATE TABLE IF NOT EXISTS surveys (
    id                    TEXT PRIMARY KEY,
    user_id               TEXT NOT NULL,
    survey_name           TEXT NOT NULL,
    survey_style          TEXT NOT NULL,
    minimum_review_length TEXT NOT NULL,
    minimum_star_rating   TEXT NOT NULL,
    time_delay            TEXT NOT NULL,
    logo_path             TEXT,
    short_code            TEXT NOT NULL UNIQUE,
    url                   TEXT NOT NULL,
    qr_code               TEXT NOT NULL,
    survey_status         TEXT NOT NULL,
    created_at            TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS surveys_user_id ON surveys (user_id);

CREATE TABLE IF NOT EXISTS survey_products (
    survey_id  TEXT NOT NULL REFERENCES surveys (id),
    product_id TEXT NOT NULL,
    PRIMARY KEY (survey_id, product_id)
);

CREATE TABLE IF NOT EXISTS short_codes (
    code      TEXT PRIMARY KEY,
    issued_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS enum_options (
    field    TEXT NOT NULL,
    code     TEXT NOT NULL,
    label    TEXT NOT NULL,
    position INTEGER NOT NULL,
    PRIMARY KEY (field, code)
);
";

/// Options written on first start when `enum_options` is empty.
const DEFAULT_ENUM_OPTIONS: &[(&str, &str, &str)] = &[
    ("survey_style", "STANDARD", "Standard"),
    ("survey_style", "GIVEAWAY", "Giveaway"),
    ("survey_style", "FEEDBACK_ONLY", "Feedback only"),
    ("minimum_review_length", "SHORT", "Short (any length)"),
    ("minimum_review_length", "MEDIUM", "Medium (50+ characters)"),
    ("minimum_review_length", "LONG", "Long (150+ characters)"),
    ("minimum_star_rating", "1", "1 star"),
    ("minimum_star_rating", "2", "2 stars"),
    ("minimum_star_rating", "3", "3 stars"),
    ("minimum_star_rating", "4", "4 stars"),
    ("minimum_star_rating", "5", "5 stars"),
    ("time_delay", "NONE", "No delay"),
    ("time_delay", "ONE_HOUR", "1 hour"),
    ("time_delay", "ONE_DAY", "24 hours"),
    ("time_delay", "ONE_WEEK", "7 days"),
];

const SHORT_CODE_LEN: usize = 8;
const SHORT_CODE_ATTEMPTS: usize = 5;

const SURVEY_COLUMNS: &str = "id, user_id, survey_name, survey_style, minimum_review_length, \
     minimum_star_rating, time_delay, logo_path, short_code, url, qr_code, survey_status, created_at";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, SurveyError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SurveyError> {
        conn.execute_batch(SCHEMA)?;
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM enum_options", [], |row| row.get(0))?;
        if existing == 0 {
            for (position, (field, code, label)) in DEFAULT_ENUM_OPTIONS.iter().enumerate() {
                conn.execute(
                    "INSERT INTO enum_options (field, code, label, position) VALUES (?1, ?2, ?3, ?4)",
                    params![field, code, label, position as i64],
                )?;
            }
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-statement leaves SQLite itself consistent.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Issues a random code, reserving it in `short_codes` so it is never
    /// handed out twice, even if the survey insert that follows fails.
    pub fn generate_short_code(&self) -> Result<String, SurveyError> {
        let conn = self.lock();
        let issued_at = Utc::now().to_rfc3339();
        for _ in 0..SHORT_CODE_ATTEMPTS {
            let code = random_code();
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO short_codes (code, issued_at) VALUES (?1, ?2)",
                    params![code, issued_at],
                )
                .map_err(|e| SurveyError::Rpc(e.to_string()))?;
            if inserted == 1 {
                return Ok(code);
            }
            warn!("short code collision on {}, retrying", code);
        }
        Err(SurveyError::Rpc(format!(
            "no unused short code after {} attempts",
            SHORT_CODE_ATTEMPTS
        )))
    }

    pub fn insert_survey(&self, survey: NewSurvey) -> Result<Survey, SurveyError> {
        let conn = self.lock();
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        conn.execute(
            &format!(
                "INSERT INTO surveys ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                SURVEY_COLUMNS
            ),
            params![
                id,
                survey.user_id,
                survey.survey_name,
                survey.survey_style,
                survey.minimum_review_length,
                survey.minimum_star_rating,
                survey.time_delay,
                survey.logo_path,
                survey.short_code,
                survey.url,
                survey.qr_code,
                survey.survey_status,
                created_at,
            ],
        )
        .map_err(|e| SurveyError::insert("surveys", e))?;

        conn.query_row(
            &format!("SELECT {} FROM surveys WHERE id = ?1", SURVEY_COLUMNS),
            params![id],
            survey_from_row,
        )
        .map_err(|e| SurveyError::insert("surveys", e))
    }

    /// Inserts all rows in one transaction: either every link lands or none.
    pub fn insert_survey_products(&self, rows: &[SurveyProduct]) -> Result<(), SurveyError> {
        let mut conn = self.lock();
        let tx = conn
            .transaction()
            .map_err(|e| SurveyError::insert("survey_products", e))?;
        for row in rows {
            tx.execute(
                "INSERT INTO survey_products (survey_id, product_id) VALUES (?1, ?2)",
                params![row.survey_id, row.product_id],
            )
            .map_err(|e| SurveyError::insert("survey_products", e))?;
        }
        tx.commit()
            .map_err(|e| SurveyError::insert("survey_products", e))
    }

    pub fn products_for_user(&self, user_id: &str) -> Result<Vec<Product>, SurveyError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, product_name, image_url, created_at FROM products \
             WHERE user_id = ?1 ORDER BY product_name, id",
        )?;
        let products = stmt
            .query_map(params![user_id], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    product_name: row.get(2)?,
                    image_url: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    pub fn surveys_for_user(&self, user_id: &str) -> Result<Vec<Survey>, SurveyError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM surveys WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            SURVEY_COLUMNS
        ))?;
        let surveys = stmt
            .query_map(params![user_id], survey_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(surveys)
    }

    pub fn enum_catalog(&self) -> Result<EnumCatalog, SurveyError> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT field, code, label FROM enum_options ORDER BY field, position")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                EnumOption {
                    value: row.get(1)?,
                    label: row.get(2)?,
                },
            ))
        })?;

        let mut catalog = EnumCatalog::default();
        for row in rows {
            let (field, option) = row?;
            match catalog.options_mut(&field) {
                Some(options) => options.push(option),
                None => warn!("ignoring enum option for unknown field {}", field),
            }
        }
        Ok(catalog)
    }

    /// Adds a product to `user_id`'s catalog.
    pub fn insert_product(
        &self,
        user_id: &str,
        product_name: &str,
        image_url: Option<&str>,
    ) -> Result<Product, SurveyError> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            product_name: product_name.trim().to_string(),
            image_url: image_url.map(str::to_string),
            created_at: Utc::now().to_rfc3339(),
        };
        self.lock()
            .execute(
                "INSERT INTO products (id, user_id, product_name, image_url, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    product.id,
                    product.user_id,
                    product.product_name,
                    product.image_url,
                    product.created_at
                ],
            )
            .map_err(|e| SurveyError::insert("products", e))?;
        Ok(product)
    }

    #[cfg(test)]
    pub fn survey_product_ids(&self, survey_id: &str) -> Result<Vec<String>, SurveyError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT product_id FROM survey_products WHERE survey_id = ?1 ORDER BY product_id",
        )?;
        let ids = stmt
            .query_map(params![survey_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

fn random_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LEN)
        .map(char::from)
        .collect()
}

fn survey_from_row(row: &Row) -> rusqlite::Result<Survey> {
    Ok(Survey {
        id: row.get(0)?,
        user_id: row.get(1)?,
        survey_name: row.get(2)?,
        survey_style: row.get(3)?,
        minimum_review_length: row.get(4)?,
        minimum_star_rating: row.get(5)?,
        time_delay: row.get(6)?,
        logo_path: row.get(7)?,
        short_code: row.get(8)?,
        url: row.get(9)?,
        qr_code: row.get(10)?,
        survey_status: row.get(11)?,
        created_at: row.get(12)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::enums::ENUM_FIELDS;
    use common::model::survey::{survey_url, STATUS_ACTIVE};
    use std::collections::HashSet;

    fn new_survey(user_id: &str, short_code: &str) -> NewSurvey {
        NewSurvey {
            user_id: user_id.to_string(),
            survey_name: "Launch".to_string(),
            survey_style: "STANDARD".to_string(),
            minimum_review_length: "SHORT".to_string(),
            minimum_star_rating: "4".to_string(),
            time_delay: "NONE".to_string(),
            logo_path: None,
            short_code: short_code.to_string(),
            url: survey_url(short_code),
            qr_code: "data:image/png;base64,AAAA".to_string(),
            survey_status: STATUS_ACTIVE.to_string(),
        }
    }

    #[test]
    fn short_codes_are_never_reissued() {
        let db = Database::open_in_memory().unwrap();
        let codes: HashSet<String> = (0..200).map(|_| db.generate_short_code().unwrap()).collect();
        assert_eq!(codes.len(), 200);
        assert!(codes
            .iter()
            .all(|c| c.len() == SHORT_CODE_LEN && c.chars().all(|ch| ch.is_ascii_alphanumeric())));
    }

    #[test]
    fn inserted_survey_comes_back_with_server_fields() {
        let db = Database::open_in_memory().unwrap();
        let survey = db.insert_survey(new_survey("user-1", "abcd1234")).unwrap();

        assert!(Uuid::parse_str(&survey.id).is_ok());
        assert!(!survey.created_at.is_empty());
        assert_eq!(survey.url, "https://reviewzone.ai/survey/abcd1234");
        assert_eq!(survey.survey_status, "ACTIVE");
        assert_eq!(survey.logo_path, None);
        assert_eq!(db.surveys_for_user("user-1").unwrap(), vec![survey]);
        assert!(db.surveys_for_user("user-2").unwrap().is_empty());
    }

    #[test]
    fn duplicate_short_code_is_an_insert_error() {
        let db = Database::open_in_memory().unwrap();
        db.insert_survey(new_survey("user-1", "same0000")).unwrap();
        let err = db.insert_survey(new_survey("user-1", "same0000")).unwrap_err();
        assert!(matches!(err, SurveyError::Insert { table: "surveys", .. }));
    }

    #[test]
    fn product_links_require_an_existing_survey() {
        let db = Database::open_in_memory().unwrap();
        let survey = db.insert_survey(new_survey("user-1", "link0001")).unwrap();

        let rows = vec![
            SurveyProduct {
                survey_id: survey.id.clone(),
                product_id: "p1".into(),
            },
            SurveyProduct {
                survey_id: survey.id.clone(),
                product_id: "p2".into(),
            },
        ];
        db.insert_survey_products(&rows).unwrap();
        assert_eq!(db.survey_product_ids(&survey.id).unwrap(), vec!["p1", "p2"]);

        let orphan = vec![SurveyProduct {
            survey_id: "no-such-survey".into(),
            product_id: "p1".into(),
        }];
        let err = db.insert_survey_products(&orphan).unwrap_err();
        assert!(matches!(err, SurveyError::Insert { table: "survey_products", .. }));
    }

    #[test]
    fn failed_link_batch_leaves_no_rows() {
        let db = Database::open_in_memory().unwrap();
        let survey = db.insert_survey(new_survey("user-1", "link0002")).unwrap();
        let rows = vec![
            SurveyProduct {
                survey_id: survey.id.clone(),
                product_id: "p1".into(),
            },
            SurveyProduct {
                survey_id: survey.id.clone(),
                product_id: "p1".into(),
            },
        ];
        assert!(db.insert_survey_products(&rows).is_err());
        assert!(db.survey_product_ids(&survey.id).unwrap().is_empty());
    }

    #[test]
    fn catalog_is_scoped_to_the_user_and_sorted_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.insert_product("user-1", "Widget", None).unwrap();
        db.insert_product("user-1", "Anvil", None).unwrap();
        db.insert_product("user-2", "Gadget", None).unwrap();

        let names: Vec<String> = db
            .products_for_user("user-1")
            .unwrap()
            .into_iter()
            .map(|p| p.product_name)
            .collect();
        assert_eq!(names, vec!["Anvil", "Widget"]);
    }

    #[test]
    fn enum_catalog_is_seeded_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enums.sqlite");

        let first = Database::open(&path).unwrap().enum_catalog().unwrap();
        let mut check = first.clone();
        for field in ENUM_FIELDS {
            assert!(!check.options_mut(field).unwrap().is_empty(), "{field}");
        }
        assert_eq!(first.survey_style[0].value, "STANDARD");
        assert_eq!(first.minimum_star_rating.len(), 5);

        let reopened = Database::open(&path).unwrap().enum_catalog().unwrap();
        assert_eq!(reopened, first);
    }
}
