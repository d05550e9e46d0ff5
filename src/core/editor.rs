use crate::core::ids::IdGenerator;
use crate::core::models::question::{Question, QuestionOption, QuestionType};
use crate::core::models::survey::{PrivacyTerms, Survey, SurveyDraft, SurveyStatus};
use crate::error::Error;

/// In-progress survey under construction. Owns the ordered question list and
/// the privacy terms; every mutation goes through one of the operations
/// below, and out-of-range indices are rejected instead of corrupting the
/// list.
///
/// One editor serves one editing session; nothing mutates it concurrently.
pub struct SurveyEditor<G: IdGenerator> {
    title: String,
    description: String,
    questions: Vec<Question>,
    privacy_terms: PrivacyTerms,
    privacy_section_visible: bool,
    survey_id: Option<String>,
    ids: G,
}

impl<G: IdGenerator> SurveyEditor<G> {
    pub fn new(ids: G) -> Self {
        SurveyEditor {
            title: String::new(),
            description: String::new(),
            questions: Vec::new(),
            privacy_terms: PrivacyTerms::default(),
            privacy_section_visible: false,
            survey_id: None,
            ids,
        }
    }

    /// Seed an editor from an existing draft survey (the edit route).
    pub fn for_survey(survey: &Survey, ids: G) -> Self {
        SurveyEditor {
            title: survey.title.clone(),
            description: survey.description.clone().unwrap_or_default(),
            questions: survey.questions.clone(),
            privacy_terms: survey.privacy_terms.clone(),
            privacy_section_visible: survey.privacy_terms.enabled,
            survey_id: Some(survey.id.clone()),
            ids,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn privacy_terms(&self) -> &PrivacyTerms {
        &self.privacy_terms
    }

    pub fn privacy_section_visible(&self) -> bool {
        self.privacy_section_visible
    }

    pub fn survey_id(&self) -> Option<&str> {
        self.survey_id.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends a default-initialized question of the given kind. Never fails.
    pub fn add_question(&mut self, type_: QuestionType) -> &Question {
        let question = Question::with_defaults(type_, &mut self.ids);
        self.questions.push(question);
        self.questions.last().expect("question was just pushed")
    }

    /// Full replacement of the question at `index`. The stored question keeps
    /// its original id regardless of what the caller supplies. No cross-field
    /// validation happens here; scale bounds are checked at publish time.
    pub fn update_question(&mut self, index: usize, mut question: Question) -> Result<(), Error> {
        let current = self.question_mut(index)?;
        question.id = current.id.clone();
        *current = question;
        Ok(())
    }

    /// Order-preserving removal; questions after `index` shift down by one.
    pub fn remove_question(&mut self, index: usize) -> Result<Question, Error> {
        self.check_bounds(index)?;
        Ok(self.questions.remove(index))
    }

    /// Moves the question at `from` to position `to`, preserving the relative
    /// order of everything else.
    pub fn move_question(&mut self, from: usize, to: usize) -> Result<(), Error> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        let question = self.questions.remove(from);
        self.questions.insert(to, question);
        Ok(())
    }

    /// Reveals the privacy editor and switches the flag on. Idempotent: the
    /// terms text is never touched.
    pub fn enable_privacy_section(&mut self) {
        self.privacy_section_visible = true;
        if !self.privacy_terms.enabled {
            self.privacy_terms.enabled = true;
        }
    }

    /// Whole-object replacement, used by the toggle switch and the text
    /// editor alike. Disabling keeps the text (soft delete).
    pub fn set_privacy_terms(&mut self, terms: PrivacyTerms) {
        self.privacy_terms = terms;
    }

    pub fn add_option(&mut self, index: usize) -> Result<&QuestionOption, Error> {
        let id = self.ids.next_id();
        let options = self.options_mut(index)?;
        options.push(QuestionOption::empty(id));
        Ok(options.last().expect("option was just pushed"))
    }

    pub fn update_option(&mut self, index: usize, opt_index: usize, text: impl Into<String>) -> Result<(), Error> {
        let options = self.options_mut(index)?;
        let len = options.len();
        let option = options.get_mut(opt_index).ok_or(Error::IndexOutOfBounds { index: opt_index, len })?;
        option.text = text.into();
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize, opt_index: usize) -> Result<QuestionOption, Error> {
        let options = self.options_mut(index)?;
        if opt_index >= options.len() {
            return Err(Error::IndexOutOfBounds {
                index: opt_index,
                len: options.len(),
            });
        }
        Ok(options.remove(opt_index))
    }

    /// Snapshot of the aggregate as a draft record, preserving question order
    /// and variant payloads exactly.
    pub fn draft(&self) -> SurveyDraft {
        SurveyDraft {
            title: self.title.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            questions: self.questions.clone(),
            privacy_terms: self.privacy_terms.clone(),
            status: SurveyStatus::Draft,
        }
    }

    fn check_bounds(&self, index: usize) -> Result<(), Error> {
        if index >= self.questions.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.questions.len(),
            });
        }
        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut Question, Error> {
        let len = self.questions.len();
        self.questions.get_mut(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    fn options_mut(&mut self, index: usize) -> Result<&mut Vec<QuestionOption>, Error> {
        self.question_mut(index)?.kind.options_mut().ok_or(Error::NotMultipleChoice)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::ids::SequenceGenerator;
    use crate::core::models::question::QuestionKind;

    fn editor() -> SurveyEditor<SequenceGenerator> {
        SurveyEditor::new(SequenceGenerator::default())
    }

    #[test]
    fn test_add_and_remove_accounting() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        ed.add_question(QuestionType::ClosedEnded);
        ed.add_question(QuestionType::Scaled);
        assert_eq!(ed.questions().len(), 3);
        ed.remove_question(1).unwrap();
        assert_eq!(ed.questions().len(), 2);
        // relative order of the untouched questions is preserved
        assert_eq!(ed.questions()[0].kind, QuestionKind::OpenEnded);
        assert_eq!(ed.questions()[1].kind.question_type(), QuestionType::Scaled);
    }

    #[test]
    fn test_add_question_matches_requested_kind() {
        let mut ed = editor();
        let q = ed.add_question(QuestionType::MultipleChoice);
        assert_eq!(q.kind.question_type(), QuestionType::MultipleChoice);
        assert_eq!(q.kind.options().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_shifts_later_questions_down() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        ed.add_question(QuestionType::ClosedEnded);
        ed.add_question(QuestionType::LikertScale);
        let before: Vec<Question> = ed.questions()[1..].to_vec();
        ed.remove_question(0).unwrap();
        assert_eq!(ed.questions(), &before[..]);
    }

    #[test]
    fn test_update_question_preserves_id() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        let original_id = ed.questions()[0].id.clone();
        let replacement = Question {
            id: "spoofed".into(),
            text: "What would you improve?".into(),
            is_required: true,
            kind: QuestionKind::OpenEnded,
        };
        ed.update_question(0, replacement).unwrap();
        assert_eq!(ed.questions()[0].id, original_id);
        assert_eq!(ed.questions()[0].text, "What would you improve?");
        assert!(ed.questions()[0].is_required);
    }

    #[test]
    fn test_out_of_range_indices_are_rejected() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        assert!(matches!(
            ed.remove_question(1),
            Err(Error::IndexOutOfBounds { index: 1, len: 1 })
        ));
        let replacement = ed.questions()[0].clone();
        assert!(ed.update_question(5, replacement).is_err());
        assert!(ed.move_question(0, 3).is_err());
        assert_eq!(ed.questions().len(), 1);
    }

    #[test]
    fn test_move_question_reorders() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        ed.add_question(QuestionType::ClosedEnded);
        ed.add_question(QuestionType::Scaled);
        ed.move_question(2, 0).unwrap();
        assert_eq!(ed.questions()[0].kind.question_type(), QuestionType::Scaled);
        assert_eq!(ed.questions()[1].kind, QuestionKind::OpenEnded);
        assert_eq!(ed.questions()[2].kind, QuestionKind::ClosedEnded);
    }

    #[test]
    fn test_enable_privacy_is_idempotent() {
        let mut ed = editor();
        ed.set_privacy_terms(PrivacyTerms {
            enabled: true,
            text: "Your data is safe.".into(),
        });
        ed.enable_privacy_section();
        ed.enable_privacy_section();
        assert!(ed.privacy_terms().enabled);
        assert_eq!(ed.privacy_terms().text, "Your data is safe.");
    }

    #[test]
    fn test_disabling_privacy_keeps_text() {
        let mut ed = editor();
        ed.enable_privacy_section();
        ed.set_privacy_terms(PrivacyTerms {
            enabled: true,
            text: "Participation is anonymous.".into(),
        });
        ed.set_privacy_terms(PrivacyTerms {
            enabled: false,
            text: "Participation is anonymous.".into(),
        });
        assert!(!ed.privacy_terms().enabled);
        assert_eq!(ed.privacy_terms().text, "Participation is anonymous.");
        assert!(ed.privacy_section_visible());
    }

    #[test]
    fn test_option_operations() {
        let mut ed = editor();
        ed.add_question(QuestionType::MultipleChoice);
        ed.add_option(0).unwrap();
        ed.add_option(0).unwrap();
        ed.update_option(0, 1, "Feature B").unwrap();
        assert_eq!(ed.questions()[0].kind.options().unwrap().len(), 3);
        assert_eq!(ed.questions()[0].kind.options().unwrap()[1].text, "Feature B");

        let removed = ed.remove_option(0, 0).unwrap();
        assert!(removed.text.is_empty());
        // former index 1 moved down to 0
        assert_eq!(ed.questions()[0].kind.options().unwrap()[0].text, "Feature B");

        assert!(matches!(ed.remove_option(0, 9), Err(Error::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_option_operations_require_multiple_choice() {
        let mut ed = editor();
        ed.add_question(QuestionType::OpenEnded);
        assert!(matches!(ed.add_option(0), Err(Error::NotMultipleChoice)));
        assert!(matches!(ed.update_option(0, 0, "x"), Err(Error::NotMultipleChoice)));
    }

    #[test]
    fn test_draft_snapshot_shape() {
        let mut ed = editor();
        ed.set_title("T");
        ed.add_question(QuestionType::OpenEnded);
        let mut q = ed.questions()[0].clone();
        q.text = "Q1".into();
        q.is_required = true;
        ed.update_question(0, q).unwrap();

        let draft = ed.draft();
        assert_eq!(draft.status, SurveyStatus::Draft);
        assert_eq!(draft.title, "T");
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].kind, QuestionKind::OpenEnded);
        assert_eq!(draft.questions[0].text, "Q1");
        assert!(draft.questions[0].is_required);
        assert!(!draft.privacy_terms.enabled);
        assert!(draft.description.is_none());
    }

    #[test]
    fn test_draft_preserves_question_order() {
        let mut ed = editor();
        ed.add_question(QuestionType::LikertScale);
        ed.add_question(QuestionType::MultipleChoice);
        ed.add_question(QuestionType::OpenEnded);
        let draft = ed.draft();
        let kinds: Vec<QuestionType> = draft.questions.iter().map(|q| q.kind.question_type()).collect();
        assert_eq!(
            kinds,
            vec![QuestionType::LikertScale, QuestionType::MultipleChoice, QuestionType::OpenEnded]
        );
    }
}
