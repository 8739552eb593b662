// 📇 Client Roster - Who to check, grouped by client
//
// CSV with header: client,personal_emails,corporate_emails
// Email columns hold comma-separated lists (quoted in the CSV).

use crate::error::{LeakError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,

    /// Personal emails first, then corporate, in roster order
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    client: String,

    #[serde(default)]
    personal_emails: String,

    #[serde(default)]
    corporate_emails: String,
}

fn split_emails(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}

pub fn load_roster(path: &Path) -> Result<Vec<Client>> {
    let file = std::fs::File::open(path)?;
    read_roster(file)
}

pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Client>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut clients = Vec::new();

    for (idx, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // +2: header line, 1-based
        let line = idx + 2;
        let row = row?;
        let name = row.client.trim().to_string();
        if name.is_empty() {
            return Err(LeakError::Roster {
                line,
                reason: "empty client name".to_string(),
            });
        }

        let emails = split_emails(&row.personal_emails)
            .chain(split_emails(&row.corporate_emails))
            .collect();
        clients.push(Client { name, emails });
    }

    Ok(clients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_roster() {
        let data = "client,personal_emails,corporate_emails\n\
                    Acme Corp,\"jane@home.io, joe@home.io\",jane@acme.com\n\
                    Solo,,\n";
        let clients = read_roster(data.as_bytes()).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].name, "Acme Corp");
        assert_eq!(clients[0].emails, vec!["jane@home.io", "joe@home.io", "jane@acme.com"]);
        assert!(clients[1].emails.is_empty());
    }

    #[test]
    fn test_empty_client_name_rejected() {
        let data = "client,personal_emails,corporate_emails\n ,a@b.c,\n";
        let err = read_roster(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LeakError::Roster { line: 2, .. }));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let data = "name,emails\nX,a@b.c\n";
        assert!(matches!(read_roster(data.as_bytes()), Err(LeakError::Csv(_))));
    }
}
