//! Curated header synonym tables.
//!
//! Lookup is exact: case and punctuation matter. Every canonical column name
//! also maps to itself (see [`crate::FieldMapper`]), so these tables only list
//! the spellings seen in spreadsheet exports.

use crm_model::EntityType;

/// Where a source header goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticTarget {
    Field(&'static str),
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule {
    pub header: &'static str,
    pub target: StaticTarget,
}

const fn to(header: &'static str, field: &'static str) -> HeaderRule {
    HeaderRule {
        header,
        target: StaticTarget::Field(field),
    }
}

const fn ignore(header: &'static str) -> HeaderRule {
    HeaderRule {
        header,
        target: StaticTarget::Ignore,
    }
}

/// Bookkeeping columns common to CRM exports.
const COMMON_IGNORED: &[HeaderRule] = &[
    ignore("ID"),
    ignore("Id"),
    ignore("Record ID"),
    ignore("Owner"),
    ignore("Record Owner"),
    ignore("Created By"),
    ignore("Modified By"),
    ignore("Last Modified By"),
    ignore("Last Modified Date"),
    ignore("Tags"),
];

const CONTACT_HEADERS: &[HeaderRule] = &[
    to("First Name", "first_name"),
    to("First name", "first_name"),
    to("FirstName", "first_name"),
    to("Given Name", "first_name"),
    to("Last Name", "last_name"),
    to("Last name", "last_name"),
    to("LastName", "last_name"),
    to("Surname", "last_name"),
    to("Family Name", "last_name"),
    to("Email", "email"),
    to("E-mail", "email"),
    to("Email Address", "email"),
    to("Phone", "phone"),
    to("Phone Number", "phone"),
    to("Work Phone", "phone"),
    to("Mobile", "mobile"),
    to("Mobile Phone", "mobile"),
    to("Cell", "mobile"),
    to("Job Title", "job_title"),
    to("Title", "job_title"),
    to("Position", "job_title"),
    to("Company", "company_name"),
    to("Company Name", "company_name"),
    to("Account Name", "company_name"),
    to("Organization", "company_name"),
    to("Address", "address"),
    to("Street", "address"),
    to("Mailing Street", "address"),
    to("City", "city"),
    to("Mailing City", "city"),
    to("State", "state"),
    to("Province", "state"),
    to("State/Province", "state"),
    to("Zip", "postal_code"),
    to("ZIP Code", "postal_code"),
    to("Zip Code", "postal_code"),
    to("Postal Code", "postal_code"),
    to("Country", "country"),
    to("Lead Source", "lead_source"),
    to("Source", "lead_source"),
    to("Status", "status"),
    to("Contact Status", "status"),
    to("Notes", "notes"),
    to("Description", "notes"),
    to("Comments", "notes"),
    to("Birthday", "date_of_birth"),
    to("Date of Birth", "date_of_birth"),
    to("DOB", "date_of_birth"),
    to("Last Contacted", "last_contacted"),
    to("Last Activity", "last_contacted"),
    to("Email Opt Out", "email_opt_out"),
    to("Unsubscribed", "email_opt_out"),
    ignore("Full Name"),
    ignore("Salutation"),
    ignore("Contact Owner"),
];

const COMPANY_HEADERS: &[HeaderRule] = &[
    to("Name", "name"),
    to("Company", "name"),
    to("Company Name", "name"),
    to("Account Name", "name"),
    to("Organization", "name"),
    to("Industry", "industry"),
    to("Sector", "industry"),
    to("Website", "website"),
    to("Web Site", "website"),
    to("URL", "website"),
    to("Phone", "phone"),
    to("Phone Number", "phone"),
    to("Email", "email"),
    to("Address", "address"),
    to("Billing Street", "address"),
    to("City", "city"),
    to("Billing City", "city"),
    to("State", "state"),
    to("Billing State", "state"),
    to("Zip", "postal_code"),
    to("Postal Code", "postal_code"),
    to("Billing Zip", "postal_code"),
    to("Country", "country"),
    to("Billing Country", "country"),
    to("Employees", "employee_count"),
    to("Employee Count", "employee_count"),
    to("Number of Employees", "employee_count"),
    to("Annual Revenue", "annual_revenue"),
    to("Revenue", "annual_revenue"),
    to("Status", "status"),
    to("Account Status", "status"),
    to("Description", "description"),
    to("Notes", "description"),
    to("Created", "created_at"),
    to("Created Date", "created_at"),
    ignore("Account Owner"),
    ignore("Parent Account"),
];

const DEAL_HEADERS: &[HeaderRule] = &[
    to("Name", "name"),
    to("Deal Name", "name"),
    to("Opportunity Name", "name"),
    to("Title", "name"),
    to("Value", "value"),
    to("Amount", "value"),
    to("Deal Value", "value"),
    to("Deal Amount", "value"),
    to("Stage", "stage"),
    to("Deal Stage", "stage"),
    to("Pipeline Stage", "stage"),
    to("Probability", "probability"),
    to("Probability (%)", "probability"),
    to("Win Probability", "probability"),
    to("Close Date", "expected_close_date"),
    to("Expected Close Date", "expected_close_date"),
    to("Contact", "contact_name"),
    to("Contact Name", "contact_name"),
    to("Primary Contact", "contact_name"),
    to("Company", "company_name"),
    to("Company Name", "company_name"),
    to("Account Name", "company_name"),
    to("Lead Source", "lead_source"),
    to("Source", "lead_source"),
    to("Description", "description"),
    to("Notes", "notes"),
    to("Created", "created_at"),
    to("Created Date", "created_at"),
    ignore("Deal Owner"),
    ignore("Pipeline"),
    ignore("Currency"),
];

const TASK_HEADERS: &[HeaderRule] = &[
    to("Title", "title"),
    to("Task", "title"),
    to("Task Name", "title"),
    to("Subject", "title"),
    to("Description", "description"),
    to("Details", "description"),
    to("Notes", "description"),
    to("Status", "status"),
    to("Task Status", "status"),
    to("Type", "task_type"),
    to("Task Type", "task_type"),
    to("Activity Type", "task_type"),
    to("Priority", "priority"),
    to("Due Date", "due_date"),
    to("Due", "due_date"),
    to("Deadline", "due_date"),
    to("Completed", "completed_at"),
    to("Completed At", "completed_at"),
    to("Completed Date", "completed_at"),
    to("Assigned To", "assigned_to"),
    to("Assignee", "assigned_to"),
    to("Related To", "related_to"),
    to("Regarding", "related_to"),
    ignore("Task Owner"),
    ignore("Reminder"),
];

const TICKET_HEADERS: &[HeaderRule] = &[
    to("Title", "title"),
    to("Subject", "title"),
    to("Ticket Title", "title"),
    to("Summary", "title"),
    to("Description", "description"),
    to("Details", "description"),
    to("Issue", "description"),
    to("Status", "status"),
    to("Ticket Status", "status"),
    to("Category", "category"),
    to("Type", "category"),
    to("Ticket Type", "category"),
    to("Priority", "priority"),
    to("Severity", "priority"),
    to("Email", "contact_email"),
    to("Contact Email", "contact_email"),
    to("Requester Email", "contact_email"),
    to("Company", "company_name"),
    to("Company Name", "company_name"),
    to("Customer", "company_name"),
    to("Assigned To", "assigned_to"),
    to("Assignee", "assigned_to"),
    to("Agent", "assigned_to"),
    to("Due Date", "due_date"),
    to("Due By", "due_date"),
    to("Resolved", "resolved_at"),
    to("Resolved At", "resolved_at"),
    to("Resolved Date", "resolved_at"),
    to("Resolution", "resolution"),
    to("Resolution Notes", "resolution"),
    ignore("Ticket ID"),
    ignore("Ticket Number"),
    ignore("Channel"),
];

const MAINTENANCE_HEADERS: &[HeaderRule] = &[
    to("Product", "product_name"),
    to("Product Name", "product_name"),
    to("Software", "product_name"),
    to("Item", "product_name"),
    to("Vendor", "vendor_name"),
    to("Vendor Name", "vendor_name"),
    to("Supplier", "vendor_name"),
    to("Amount", "cost"),
    to("Price", "cost"),
    to("Cost", "cost"),
    to("Annual Cost", "cost"),
    to("Start Date", "start_date"),
    to("Start", "start_date"),
    to("Contract Start", "start_date"),
    to("End Date", "end_date"),
    to("Expiry Date", "end_date"),
    to("Expiration Date", "end_date"),
    to("Contract End", "end_date"),
    to("Renewal Date", "renewal_date"),
    to("Renewal", "renewal_date"),
    to("Status", "status"),
    to("License Key", "license_key"),
    to("License", "license_key"),
    to("Serial Number", "license_key"),
    to("Contract Number", "contract_number"),
    to("Contract #", "contract_number"),
    to("PO Number", "contract_number"),
    to("Auto Renew", "auto_renew"),
    to("Auto-Renew", "auto_renew"),
    to("Notes", "notes"),
    to("Comments", "notes"),
    to("Description", "notes"),
    ignore("Department"),
    ignore("Cost Center"),
];

const VENDOR_HEADERS: &[HeaderRule] = &[
    to("Name", "name"),
    to("Vendor", "name"),
    to("Vendor Name", "name"),
    to("Supplier", "name"),
    to("Company", "name"),
    to("Contact", "contact_name"),
    to("Contact Name", "contact_name"),
    to("Contact Person", "contact_name"),
    to("Email", "email"),
    to("Phone", "phone"),
    to("Website", "website"),
    to("URL", "website"),
    to("Address", "address"),
    to("City", "city"),
    to("State", "state"),
    to("Zip", "postal_code"),
    to("Postal Code", "postal_code"),
    to("Country", "country"),
    to("Category", "category"),
    to("Type", "category"),
    to("Status", "status"),
    to("Rating", "rating"),
    to("Score", "rating"),
    to("Notes", "notes"),
    to("Comments", "notes"),
    ignore("Vendor ID"),
    ignore("Payment Terms"),
];

const FORECAST_HEADERS: &[HeaderRule] = &[
    to("Name", "name"),
    to("Forecast", "name"),
    to("Forecast Name", "name"),
    to("Period Start", "period_start"),
    to("Start Date", "period_start"),
    to("From", "period_start"),
    to("Period End", "period_end"),
    to("End Date", "period_end"),
    to("To", "period_end"),
    to("Target", "target_amount"),
    to("Target Amount", "target_amount"),
    to("Quota", "target_amount"),
    to("Forecast Amount", "forecast_amount"),
    to("Projected", "forecast_amount"),
    to("Actual", "actual_amount"),
    to("Actual Amount", "actual_amount"),
    to("Closed Amount", "actual_amount"),
    to("Confidence", "confidence"),
    to("Confidence (%)", "confidence"),
    to("Category", "category"),
    to("Forecast Category", "category"),
    to("Notes", "notes"),
    ignore("Forecast Owner"),
    ignore("Currency"),
];

const REPORT_HEADERS: &[HeaderRule] = &[
    to("Name", "name"),
    to("Report", "name"),
    to("Report Name", "name"),
    to("Type", "report_type"),
    to("Report Type", "report_type"),
    to("Description", "description"),
    to("Frequency", "frequency"),
    to("Schedule", "frequency"),
    to("Public", "is_public"),
    to("Is Public", "is_public"),
    to("Shared", "is_public"),
    to("Generated", "generated_at"),
    to("Generated At", "generated_at"),
    to("Last Run", "generated_at"),
    ignore("Folder"),
    ignore("Report Owner"),
];

/// Entity-specific synonyms, without the shared ignore list.
pub fn header_rules(entity: EntityType) -> &'static [HeaderRule] {
    match entity {
        EntityType::Contacts => CONTACT_HEADERS,
        EntityType::Companies => COMPANY_HEADERS,
        EntityType::Deals => DEAL_HEADERS,
        EntityType::Tasks => TASK_HEADERS,
        EntityType::Tickets => TICKET_HEADERS,
        EntityType::Maintenance => MAINTENANCE_HEADERS,
        EntityType::Vendors => VENDOR_HEADERS,
        EntityType::Forecasts => FORECAST_HEADERS,
        EntityType::Reports => REPORT_HEADERS,
    }
}

/// Headers ignored for every entity type.
pub fn common_ignored() -> &'static [HeaderRule] {
    COMMON_IGNORED
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_target_is_a_valid_column() {
        for entity in EntityType::ALL {
            let schema = entity.schema();
            for rule in header_rules(entity) {
                if let StaticTarget::Field(field) = rule.target {
                    assert!(
                        schema.has_column(field),
                        "{entity}: {} -> {field}",
                        rule.header
                    );
                }
            }
        }
    }

    #[test]
    fn headers_are_unique_per_entity() {
        for entity in EntityType::ALL {
            let mut seen = BTreeSet::new();
            for rule in header_rules(entity).iter().chain(common_ignored()) {
                assert!(seen.insert(rule.header), "{entity}: {}", rule.header);
            }
        }
    }

    #[test]
    fn synonyms_never_shadow_canonical_names() {
        for entity in EntityType::ALL {
            let schema = entity.schema();
            for rule in header_rules(entity) {
                assert!(
                    !schema.has_column(rule.header),
                    "{entity}: {} is a column name",
                    rule.header
                );
            }
        }
    }

    #[test]
    fn maintenance_cost_synonyms() {
        let rules = header_rules(EntityType::Maintenance);
        for header in ["Amount", "Price", "Cost"] {
            let rule = rules.iter().find(|rule| rule.header == header).unwrap();
            assert_eq!(rule.target, StaticTarget::Field("cost"));
        }
    }
}
