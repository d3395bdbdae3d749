// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use clinibook_core::{BookingSession, PicklistCatalog, PicklistValue};
use colored::Color;

use crate::cli::Context;
use crate::notifier::TerminalNotifier;
use crate::table::{Column, Table};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub clinic: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdOptions {
    pub const NAME: &str = "options";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List clinics and the specialists available at each")
            .arg(arg!(--clinic <CLINIC> "Only show the specialists of this clinic"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            clinic: matches.get_one::<String>("clinic").cloned(),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing options...");
        let session = BookingSession::load(ctx.core.clone(), &ctx.backend, TerminalNotifier).await?;

        let rows = collect_rows(
            session.clinic_options(),
            session.specialist_catalog(),
            self.clinic.as_deref(),
        )?;

        match self.output_format {
            ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            ArgOutputFormat::Table if rows.is_empty() => println!("No clinics available"),
            ArgOutputFormat::Table => {
                let columns = [OptionColumn::Clinic, OptionColumn::Specialists];
                print!("{}", Table::new(&columns, &rows));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
struct ClinicRow {
    clinic: PicklistValue,
    specialists: Vec<PicklistValue>,
}

fn collect_rows(
    clinics: &[PicklistValue],
    specialists: &PicklistCatalog,
    only: Option<&str>,
) -> Result<Vec<ClinicRow>, Box<dyn Error>> {
    let selected: Vec<&PicklistValue> = match only {
        Some(name) => {
            let clinic = clinics
                .iter()
                .find(|a| a.value == name || a.label == name)
                .ok_or_else(|| format!("Unknown clinic: {name}"))?;
            vec![clinic]
        }
        None => clinics.iter().collect(),
    };

    Ok(selected
        .into_iter()
        .map(|clinic| ClinicRow {
            clinic: clinic.clone(),
            specialists: specialists.dependent_options(&clinic.value),
        })
        .collect())
}

enum OptionColumn {
    Clinic,
    Specialists,
}

impl Column<ClinicRow> for OptionColumn {
    fn format(&self, row: &ClinicRow) -> String {
        match self {
            OptionColumn::Clinic => row.clinic.label.clone(),
            OptionColumn::Specialists if row.specialists.is_empty() => "-".to_string(),
            OptionColumn::Specialists => row
                .specialists
                .iter()
                .map(|a| a.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn get_color(&self, row: &ClinicRow) -> Option<Color> {
        match self {
            OptionColumn::Clinic => Some(Color::Cyan),
            OptionColumn::Specialists if row.specialists.is_empty() => Some(Color::BrightBlack),
            OptionColumn::Specialists => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clinibook_core::ControllerKey;

    use super::*;

    fn catalogs() -> (Vec<PicklistValue>, PicklistCatalog) {
        let clinics = vec![PicklistValue::new("Norte"), PicklistValue::new("Sur")];
        let specialists = PicklistCatalog::new(
            vec![
                PicklistValue::new("Dermatology").valid_for([0, 1]),
                PicklistValue::new("Cardiology").valid_for([1]),
            ],
            [
                ("Norte".to_string(), ControllerKey::new(0)),
                ("Sur".to_string(), ControllerKey::new(1)),
            ],
        );
        (clinics, specialists)
    }

    #[test]
    fn test_parse_options() {
        let cmd = Command::new("test").subcommand(CmdOptions::command());
        let matches = cmd.try_get_matches_from(["test", "options"]).unwrap();
        let sub = matches.subcommand_matches(CmdOptions::NAME).unwrap();
        let parsed = CmdOptions::from(sub);
        assert_eq!(parsed.clinic, None);
        assert_eq!(parsed.output_format, ArgOutputFormat::Table);
    }

    #[test]
    fn rows_for_every_clinic() {
        let (clinics, specialists) = catalogs();
        let rows = collect_rows(&clinics, &specialists, None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].specialists.len(), 1);
        assert_eq!(rows[1].specialists.len(), 2);
    }

    #[test]
    fn rows_for_one_clinic() {
        let (clinics, specialists) = catalogs();
        let rows = collect_rows(&clinics, &specialists, Some("Sur")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(OptionColumn::Specialists.format(&rows[0]), "Dermatology, Cardiology");
    }

    #[test]
    fn unknown_clinic_is_an_error() {
        let (clinics, specialists) = catalogs();
        assert!(collect_rows(&clinics, &specialists, Some("Este")).is_err());
    }
}
