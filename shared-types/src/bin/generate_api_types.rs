use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Company types
    types.push(clean_type(FontFamily::export_to_string()?));
    types.push(clean_type(BrandConfig::export_to_string()?));
    types.push(clean_type(Company::export_to_string()?));
    types.push(clean_type(UpdateCompanyRequest::export_to_string()?));
    types.push(clean_type(CompaniesResponse::export_to_string()?));
    types.push(clean_type(EditorDataResponse::export_to_string()?));

    // Section types
    types.push(clean_type(SectionKind::export_to_string()?));
    types.push(clean_type(PageSection::export_to_string()?));
    types.push(clean_type(AddSectionRequest::export_to_string()?));
    types.push(clean_type(UpdateSectionRequest::export_to_string()?));
    types.push(clean_type(MoveDirection::export_to_string()?));
    types.push(clean_type(MoveSectionRequest::export_to_string()?));

    // Job types
    types.push(clean_type(WorkPolicy::export_to_string()?));
    types.push(clean_type(EmploymentType::export_to_string()?));
    types.push(clean_type(ExperienceLevel::export_to_string()?));
    types.push(clean_type(JobType::export_to_string()?));
    types.push(clean_type(Job::export_to_string()?));
    types.push(clean_type(CreateJobRequest::export_to_string()?));
    types.push(clean_type(UpdateJobRequest::export_to_string()?));
    types.push(clean_type(JobsResponse::export_to_string()?));

    // Admin and auth types
    types.push(clean_type(AuthUser::export_to_string()?));
    types.push(clean_type(AuthSessionResponse::export_to_string()?));
    types.push(clean_type(SignInRequest::export_to_string()?));
    types.push(clean_type(SignUpRequest::export_to_string()?));
    types.push(clean_type(SignUpResponse::export_to_string()?));
    types.push(clean_type(AdminCompanySummary::export_to_string()?));
    types.push(clean_type(AdminProfile::export_to_string()?));
    types.push(clean_type(CreateAdminCompanyRequest::export_to_string()?));
    types.push(clean_type(EditorRedirect::export_to_string()?));
    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
