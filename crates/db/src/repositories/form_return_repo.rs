//! Repository for the `form_returns` table.

use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;
use sqlx::PgPool;

use crate::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, organization_name, address_line1, \
    district, amphoe, province, zipcode, region_type, phone_number, number_of_signers, \
    image1, image2, created_at, updated_at";

/// Name of the unique constraint on `phone_number`.
pub const PHONE_NUMBER_CONSTRAINT: &str = "uq_form_returns_phone_number";

/// Provides CRUD operations for form returns.
pub struct FormReturnRepo;

impl FormReturnRepo {
    /// Insert a new form return, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFormReturn) -> Result<FormReturn, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_returns
                (first_name, last_name, organization_name, address_line1, district, amphoe,
                 province, zipcode, region_type, phone_number, number_of_signers, image1, image2)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        sqlx::query_as::<_, FormReturn>(&query)
            .bind(&f.first_name)
            .bind(&f.last_name)
            .bind(&f.organization_name)
            .bind(&f.address_line1)
            .bind(&f.district)
            .bind(&f.amphoe)
            .bind(&f.province)
            .bind(&f.zipcode)
            .bind(&f.region_type)
            .bind(&f.phone_number)
            .bind(f.number_of_signers)
            .bind(&input.image1)
            .bind(&input.image2)
            .fetch_one(pool)
            .await
    }

    /// Find a form return by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FormReturn>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_returns WHERE id = $1");
        sqlx::query_as::<_, FormReturn>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List form returns whose first or last name contains `search`
    /// (case-sensitive), ordered by creation time then id.
    ///
    /// `strpos` keeps `%` and `_` in the search text literal.
    pub async fn list(
        pool: &PgPool,
        search: &str,
        sort: SortDirection,
    ) -> Result<Vec<FormReturn>, sqlx::Error> {
        let dir = sort.sql_keyword();
        let query = format!(
            "SELECT {COLUMNS} FROM form_returns
             WHERE $1 = '' OR strpos(first_name, $1) > 0 OR strpos(last_name, $1) > 0
             ORDER BY created_at {dir}, id {dir}"
        );
        sqlx::query_as::<_, FormReturn>(&query)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Replace every non-image column. Image columns keep their value when
    /// the input carries `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFormReturn,
    ) -> Result<Option<FormReturn>, sqlx::Error> {
        let query = format!(
            "UPDATE form_returns SET
                first_name = $2,
                last_name = $3,
                organization_name = $4,
                address_line1 = $5,
                district = $6,
                amphoe = $7,
                province = $8,
                zipcode = $9,
                region_type = $10,
                phone_number = $11,
                number_of_signers = $12,
                image1 = COALESCE($13, image1),
                image2 = COALESCE($14, image2),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let f = &input.fields;
        sqlx::query_as::<_, FormReturn>(&query)
            .bind(id)
            .bind(&f.first_name)
            .bind(&f.last_name)
            .bind(&f.organization_name)
            .bind(&f.address_line1)
            .bind(&f.district)
            .bind(&f.amphoe)
            .bind(&f.province)
            .bind(&f.zipcode)
            .bind(&f.region_type)
            .bind(&f.phone_number)
            .bind(f.number_of_signers)
            .bind(&input.image1)
            .bind(&input.image2)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a form return, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<FormReturn>, sqlx::Error> {
        let query = format!("DELETE FROM form_returns WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, FormReturn>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether any form return uses `phone_number`.
    pub async fn phone_exists(pool: &PgPool, phone_number: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM form_returns WHERE phone_number = $1)")
                .bind(phone_number)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
