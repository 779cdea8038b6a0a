//! CSV parsing and row validation.

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::domain::{
    imports::{
        data::ImportRow,
        errors::{ImportError, ImportRowError},
    },
    members::{data::NewMember, role::MemberRole},
};

/// Template offered to admins preparing an import.
pub const BATCH_EXAMPLE_CSV: &str = include_str!("../../../assets/batch-example.csv");

const REQUIRED_COLUMNS: [&str; 2] = ["organization_name", "email"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    organization_name: Option<String>,
    organization_external_id: Option<String>,
    billing_currency: Option<String>,
    email: Option<String>,
    name: Option<String>,
    surname: Option<String>,
    phone: Option<String>,
    role: Option<String>,
}

/// Parse and validate every row of `input`.
///
/// # Errors
///
/// Returns [`ImportError::Invalid`] listing every problem found when any row
/// fails; no row is returned in that case.
pub fn parse_rows(input: &[u8]) -> Result<Vec<ImportRow>, ImportError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|err| ImportError::Invalid(vec![ImportRowError::new(0, None, err.to_string())]))?
        .clone();

    let missing: Vec<ImportRowError> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| ImportRowError::new(0, Some(*column), "column is missing"))
        .collect();

    if !missing.is_empty() {
        return Err(ImportError::Invalid(missing));
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (index, record) in reader.deserialize::<RawRow>().enumerate() {
        let row = index + 1;

        match record {
            Ok(raw) => match validate(row, raw) {
                Ok(parsed) => rows.push(parsed),
                Err(mut row_errors) => errors.append(&mut row_errors),
            },
            Err(err) => errors.push(ImportRowError::new(row, None, err.to_string())),
        }
    }

    if !errors.is_empty() {
        return Err(ImportError::Invalid(errors));
    }

    if rows.is_empty() {
        return Err(ImportError::Invalid(vec![ImportRowError::new(
            0,
            None,
            "file has no rows",
        )]));
    }

    Ok(rows)
}

fn validate(row: usize, raw: RawRow) -> Result<ImportRow, Vec<ImportRowError>> {
    let mut errors = Vec::new();

    let organization_name = present(raw.organization_name);
    if organization_name.is_none() {
        errors.push(ImportRowError::new(row, Some("organization_name"), "can't be blank"));
    }

    let email = present(raw.email).map(|email| email.to_lowercase());
    match email.as_deref() {
        None => errors.push(ImportRowError::new(row, Some("email"), "can't be blank")),
        Some(email) if !is_email(email) => {
            errors.push(ImportRowError::new(row, Some("email"), "is not a valid email"));
        }
        Some(_) => {}
    }

    let billing_currency = present(raw.billing_currency).map(|code| code.to_ascii_uppercase());
    if let Some(code) = billing_currency.as_deref()
        && !is_currency(code)
    {
        errors.push(ImportRowError::new(
            row,
            Some("billing_currency"),
            format!("`{code}` is not a three-letter currency code"),
        ));
    }

    let role = match present(raw.role).map(|role| role.parse::<MemberRole>()).transpose() {
        Ok(role) => role.unwrap_or_default(),
        Err(err) => {
            errors.push(ImportRowError::new(row, Some("role"), err.to_string()));
            MemberRole::default()
        }
    };

    match (organization_name, email) {
        (Some(organization_name), Some(email)) if errors.is_empty() => Ok(ImportRow {
            row,
            organization_name,
            organization_external_id: present(raw.organization_external_id),
            billing_currency,
            member: NewMember {
                email,
                name: present(raw.name),
                surname: present(raw.surname),
                phone: present(raw.phone),
                role,
            },
        }),
        _ => Err(errors),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn is_currency(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn errors_of(input: &str) -> Result<Vec<ImportRowError>, String> {
        match parse_rows(input.as_bytes()) {
            Err(ImportError::Invalid(errors)) => Ok(errors),
            other => Err(format!("expected invalid import, got {other:?}")),
        }
    }

    #[test]
    fn example_file_parses() -> TestResult {
        let rows = parse_rows(BATCH_EXAMPLE_CSV.as_bytes())?;

        assert_eq!(rows.len(), 3);

        let first = rows.first().ok_or("no rows")?;

        assert_eq!(first.row, 1);
        assert_eq!(first.organization_external_id.as_deref(), Some("ACME-001"));
        assert_eq!(first.member.role, MemberRole::SuperAdmin);

        let last = rows.last().ok_or("no rows")?;

        assert_eq!(last.organization_external_id, None);
        assert_eq!(last.billing_currency.as_deref(), Some("EUR"));

        Ok(())
    }

    #[test]
    fn blank_optional_fields_default() -> TestResult {
        let rows = parse_rows(
            b"organization_name,email,role,billing_currency\nAcme, Jane@Acme.test ,,usd\n",
        )?;

        let row = rows.first().ok_or("no rows")?;

        assert_eq!(row.member.email, "jane@acme.test");
        assert_eq!(row.member.role, MemberRole::Member);
        assert_eq!(row.member.phone, None);
        assert_eq!(row.billing_currency.as_deref(), Some("USD"));

        Ok(())
    }

    #[test]
    fn reports_every_error_with_row_numbers() -> TestResult {
        let errors = errors_of(
            "organization_name,email,billing_currency,role\n\
             Acme,jane@acme.test,USD,Admin\n\
             ,not-an-email,US1,Owner\n\
             Globex,,,\n",
        )?;

        let fields: Vec<(usize, Option<&str>)> = errors
            .iter()
            .map(|error| (error.row, error.field.as_deref()))
            .collect();

        assert_eq!(
            fields,
            vec![
                (2, Some("organization_name")),
                (2, Some("email")),
                (2, Some("billing_currency")),
                (2, Some("role")),
                (3, Some("email")),
            ]
        );

        Ok(())
    }

    #[test]
    fn missing_columns_are_reported_against_the_header() -> TestResult {
        let errors = errors_of("organization_name,name\nAcme,Jane\n")?;

        assert_eq!(errors, vec![ImportRowError::new(0, Some("email"), "column is missing")]);

        Ok(())
    }

    #[test]
    fn empty_files_are_rejected() -> TestResult {
        let errors = errors_of("organization_name,email\n")?;

        assert_eq!(errors.len(), 1);

        Ok(())
    }

    #[test]
    fn email_format() {
        assert!(is_email("jane.doe@acme.test"));
        assert!(!is_email("jane@acme"));
        assert!(!is_email("@acme.test"));
        assert!(!is_email("jane doe@acme.test"));
        assert!(!is_email("jane@@acme.test"));
    }
}
