// All LLM prompt constants for the extraction module and the question
// generator.

/// System prompt for resume profile extraction — enforces JSON-only output.
pub const RESUME_EXTRACT_SYSTEM: &str =
    "You are an expert at extracting structured information from resumes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume extraction prompt template. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"Given the raw resume text below, extract the candidate's information.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "string",
  "contact": {
    "email": "string or null",
    "phone": "string or null",
    "linkedin": "string or null"
  },
  "education": [
    {"degree": "string", "major": "string or null", "institution": "string", "year": "string or null"}
  ],
  "experience": [
    {"title": "string", "company": "string", "start_date": "string or null", "end_date": "string or null", "duration": "string or null", "responsibilities": ["string"]}
  ],
  "projects": [
    {"name": "string", "description": "string", "technologies": ["string"]}
  ],
  "skills": ["string"]
}

Resume:
"""{resume_text}"""
"#;

/// System prompt for career-level extraction from job descriptions.
pub const JOB_LEVELS_SYSTEM: &str =
    "You are an expert at extracting structured information from career path documents. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Career-level extraction prompt template. Replace `{document_text}` before sending.
pub const JOB_LEVELS_PROMPT_TEMPLATE: &str = r#"Given the raw career path text below, extract the information for each career level (Junior, Mid-Level, Senior, Principal) as separate JSON objects.

For each level found, return an object with this structure:
{
  "level": "string (e.g., Junior, Mid-Level)",
  "title": "string",
  "experience": "string (years or range)",
  "focus": "string",
  "core_requirements": ["string"],
  "soft_skills": ["string"],
  "technologies_mentioned": ["string"]
}

Rules:
- Extract details for each level separately; only include levels present in the text
- Extract exact years/ranges for experience (e.g. "2-5 years")
- List all technologies/tools mentioned for each level
- Preserve the original wording when possible
- Return a JSON array of level objects

Input Text:
"""{document_text}"""
"#;

/// Interview question generation prompt template.
/// Replace `{resume_json}`, `{job_json}`, and `{num_questions}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert interview question generator. Based on the following candidate profile:
{resume_json}

and the following job description:
{job_json}

generate {num_questions} relevant interview questions that would help assess the candidate's suitability for the role. Focus on skills, experience, and alignment with the job requirements. Format each question on a new line, with no numbering and no other text."#;

/// System prompt for question generation.
pub const QUESTIONS_SYSTEM: &str =
    "You are a senior technical interviewer. Produce sharp, role-specific \
    interview questions. Output one question per line and nothing else.";
