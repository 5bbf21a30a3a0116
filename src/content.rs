//! Hand-written page content.

pub const OWNER_NAME: &str = "Veera Venkata Vamsi Pachipala";
pub const BRAND_NAME: &str = "Vamsi";
pub const ROLE_BADGE: &str = "Full Stack Developer";
pub const HERO_LEAD: &str = "Crafting elegant";
pub const HERO_HIGHLIGHT: &str = "digital experiences";
pub const HERO_SUMMARY: &str = "4+ years of building scalable applications with React, Node.js, and Next.js. Specializing in healthcare and HR automation.";

pub const RESUME_PATH: &str = "/resume.pdf";
pub const RESUME_DOWNLOAD_NAME: &str = "Veera_Resume.pdf";

pub const GITHUB_URL: &str = "https://github.com/vamsipachipala";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/vamsi-pachipala-7b7b2321a/";
pub const EMAIL_URL: &str = "mailto:vamsipachipala@gmail.com";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectRecord {
    pub title: &'static str,
    pub description: &'static [&'static str],
    pub tech: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EducationRecord {
    pub institution: &'static str,
    pub degree: &'static str,
    pub gpa: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Amber,
    Emerald,
    Blue,
    Purple,
}

impl Accent {
    pub fn class(self) -> &'static str {
        match self {
            Self::Amber => "accent-amber",
            Self::Emerald => "accent-emerald",
            Self::Blue => "accent-blue",
            Self::Purple => "accent-purple",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static str,
    pub accent: Accent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileLink {
    pub label: &'static str,
    pub href: &'static str,
    /// Opens in a new tab.
    pub external: bool,
}

pub const PROJECTS: [ProjectRecord; 3] = [
    ProjectRecord {
        title: "Digital Healthcare Platform – Patient & Provider Portal",
        description: &[
            "A next-generation healthcare platform designed to improve patient outcomes and provider efficiency.",
            "Developed a secure and scalable platform integrating telemedicine, AI-driven diagnostics, and electronic medical records (EMR).",
            "Enhanced patient engagement with automated appointment reminders and an intuitive user interface.",
            "Streamlined healthcare operations through HL7/FHIR-compliant data integrations.",
        ],
        tech: &[
            "React.js",
            "TypeScript",
            "Next.js",
            "React Query",
            "Material-UI",
            "Nest.js",
            "PostgreSQL",
            "Docker",
            "Kafka",
        ],
    },
    ProjectRecord {
        title: "Employee Management System – CRM-Style HR Automation",
        description: &[
            "A cloud-based HR automation system built to digitize workflows and streamline employee management.",
            "Built a cloud-native HR platform automating payroll, performance tracking, and employee lifecycle management.",
            "Optimized payroll operations and reporting with robust backend workflows.",
            "Delivered a self-service employee portal to reduce dependency on HR support.",
        ],
        tech: &[
            "React.js",
            "Redux",
            "React Query",
            "Material-UI",
            "SCSS",
            "Node.js",
            "Firebase",
            "Docker",
            "GitLab CI/CD",
        ],
    },
    ProjectRecord {
        title: "Employee Management Mobile App – React Native Extension",
        description: &[
            "A mobile extension empowering employees and HR with real-time access to key workforce tools.",
            "Developed a cross-platform mobile app (iOS & Android) for HR functions including timesheets, payroll, and approvals.",
            "Delivered consistent user experience with a single codebase and modular architecture.",
            "Implemented offline-first data sync and real-time notifications using Firebase.",
        ],
        tech: &[
            "React Native",
            "TypeScript",
            "Redux",
            "React Query",
            "Firebase",
            "Material Design",
            "GitLab CI/CD",
        ],
    },
];

pub const SKILL_GROUPS: [SkillGroup; 4] = [
    SkillGroup {
        title: "Frontend Development",
        items: "React, Next.js, Redux, React Native, TypeScript, Material UI, Tailwind CSS",
        accent: Accent::Amber,
    },
    SkillGroup {
        title: "Backend Development",
        items: "Node.js, Express, Java, Spring Boot, REST APIs, GraphQL",
        accent: Accent::Emerald,
    },
    SkillGroup {
        title: "Database & Storage",
        items: "PostgreSQL, MongoDB, Firebase, Prisma, Redis",
        accent: Accent::Blue,
    },
    SkillGroup {
        title: "Cloud & DevOps",
        items: "GCP, Docker, CI/CD, GitHub Actions, Kubernetes, Terraform",
        accent: Accent::Purple,
    },
];

pub const EDUCATION: [EducationRecord; 2] = [
    EducationRecord {
        institution: "Kennesaw State University, Georgia, USA",
        degree: "Master of Science, Computer Science",
        gpa: "GPA: 3.87 / 4.0",
    },
    EducationRecord {
        institution: "Sasi Engineering College, Andhra Pradesh, India",
        degree: "Bachelor of Technology, Computer Science & Engineering",
        gpa: "GPA: 8.5 / 10.0",
    },
];

pub const PROFILE_LINKS: [ProfileLink; 3] = [
    ProfileLink {
        label: "GitHub",
        href: GITHUB_URL,
        external: true,
    },
    ProfileLink {
        label: "LinkedIn",
        href: LINKEDIN_URL,
        external: true,
    },
    ProfileLink {
        label: "Email",
        href: EMAIL_URL,
        external: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_project_has_copy_and_tags() {
        for project in PROJECTS {
            assert!(!project.title.is_empty());
            assert!(!project.description.is_empty());
            assert!(!project.tech.is_empty());
        }
    }

    #[test]
    fn only_mail_link_stays_in_tab() {
        let in_tab: Vec<&str> = PROFILE_LINKS
            .iter()
            .filter(|link| !link.external)
            .map(|link| link.href)
            .collect();

        assert_eq!(in_tab, vec![EMAIL_URL]);
    }
}
