//! Visibility × role × institution access matrix (spec §4.K).
//!
//! `is_visible` is the single source of truth for "can this caller see this
//! document". It is applied twice by the retriever: once as a store-level
//! filter (so candidates the caller cannot see are never counted, let alone
//! returned — spec §4.K: "a query MUST filter at the store level, not only
//! post-hoc, to avoid information leakage through result counts") and once
//! more as a final guard before results are assembled.

use crate::entities::Document;
use crate::value_objects::{ApprovalStatus, Role, UserContext, Visibility};

/// Whether `user` may see `doc`, per the access matrix in spec §4.K.
#[must_use]
pub fn is_visible(doc: &Document, user: &UserContext) -> bool {
    if doc.uploaded_by == Some(user.user_id) {
        return true;
    }

    let same_institution = match (&doc.institution_id, &user.institution_id) {
        (Some(doc_inst), Some(user_inst)) => doc_inst == user_inst,
        _ => false,
    };

    match doc.visibility {
        Visibility::Public => true,

        Visibility::InstitutionOnly => same_institution || user.role == Role::Developer,

        Visibility::Restricted => {
            if !same_institution && user.role != Role::Developer {
                return false;
            }
            match user.role {
                Role::DocumentOfficer | Role::UniversityAdmin | Role::Developer => true,
                Role::MinistryAdmin => doc.approval_status == ApprovalStatus::Pending || same_institution,
                Role::Student => false,
            }
        }

        Visibility::Confidential => {
            if !same_institution && user.role != Role::Developer {
                return false;
            }
            match user.role {
                Role::UniversityAdmin | Role::Developer => true,
                Role::MinistryAdmin => {
                    doc.approval_status == ApprovalStatus::Pending || same_institution
                }
                Role::DocumentOfficer | Role::Student => false,
            }
        }
    }
}

/// Human-readable denial reason for a 403 response (spec §6 error model).
///
/// Only meaningful to call when [`is_visible`] has already returned `false`;
/// picks the most specific applicable reason.
#[must_use]
pub fn denial_reason(doc: &Document, user: &UserContext) -> &'static str {
    let same_institution = match (&doc.institution_id, &user.institution_id) {
        (Some(doc_inst), Some(user_inst)) => doc_inst == user_inst,
        _ => false,
    };

    match doc.visibility {
        Visibility::Public => "access denied",
        Visibility::Confidential if user.role == Role::DocumentOfficer || user.role == Role::Student => {
            "elevated clearance required"
        }
        _ if !same_institution => "restricted to institution members",
        _ => "limited access permissions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::DocumentId;

    fn doc(visibility: Visibility, institution: Option<&str>, approval: ApprovalStatus) -> Document {
        let mut d = Document::new("f.pdf", "hash", crate::value_objects::StorageKind::Database, "ref", 1);
        d.id = DocumentId::new();
        d.visibility = visibility;
        d.institution_id = institution.map(str::to_string);
        d.approval_status = approval;
        d
    }

    fn ctx(role: Role, institution: Option<&str>) -> UserContext {
        UserContext::new(crate::value_objects::UserId::new(), role, institution.map(str::to_string))
    }

    #[test]
    fn public_is_visible_to_everyone() {
        let d = doc(Visibility::Public, None, ApprovalStatus::Approved);
        assert!(is_visible(&d, &ctx(Role::Student, None)));
        assert!(is_visible(&d, &ctx(Role::Developer, None)));
    }

    #[test]
    fn institution_only_requires_institution_match() {
        let d = doc(Visibility::InstitutionOnly, Some("inst-1"), ApprovalStatus::Approved);
        assert!(is_visible(&d, &ctx(Role::Student, Some("inst-1"))));
        assert!(!is_visible(&d, &ctx(Role::Student, Some("inst-2"))));
        assert!(is_visible(&d, &ctx(Role::Developer, Some("inst-2"))));
    }

    #[test]
    fn confidential_excludes_document_officer_and_student() {
        let d = doc(Visibility::Confidential, Some("inst-1"), ApprovalStatus::Approved);
        assert!(!is_visible(&d, &ctx(Role::DocumentOfficer, Some("inst-1"))));
        assert!(!is_visible(&d, &ctx(Role::Student, Some("inst-1"))));
        assert!(is_visible(&d, &ctx(Role::UniversityAdmin, Some("inst-1"))));
    }

    #[test]
    fn ministry_admin_sees_restricted_only_when_public_pending_or_own_institution() {
        let pending = doc(Visibility::Restricted, Some("inst-1"), ApprovalStatus::Pending);
        assert!(is_visible(&pending, &ctx(Role::MinistryAdmin, Some("inst-2"))));

        let approved_other = doc(Visibility::Restricted, Some("inst-1"), ApprovalStatus::Approved);
        assert!(!is_visible(&approved_other, &ctx(Role::MinistryAdmin, Some("inst-2"))));

        let approved_own = doc(Visibility::Restricted, Some("inst-1"), ApprovalStatus::Approved);
        assert!(is_visible(&approved_own, &ctx(Role::MinistryAdmin, Some("inst-1"))));
    }

    #[test]
    fn uploader_always_sees_own_document() {
        let mut d = doc(Visibility::Confidential, Some("inst-1"), ApprovalStatus::Approved);
        let user = ctx(Role::Student, Some("inst-9"));
        d.uploaded_by = Some(user.user_id);
        assert!(is_visible(&d, &user));
    }
}
