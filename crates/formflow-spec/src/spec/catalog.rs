//! Built-in recruitment questionnaire for the credit manager role.

use crate::spec::form::{FinalMessages, Questionnaire};
use crate::spec::question::{
    AnswerOption, ChoiceQuestion, Question, QuestionId, TextQuestion, TextValidation,
};

const CUSTOMER_CONTACT_REQUIRED: &str = "Agradecemos o teu interesse, mas este projeto exige forte interação com clientes. Desejamos-te muito sucesso!";
const COMMISSION_BASED: &str = "Esta função baseia-se em comissões e liberdade total — não é o fit ideal neste momento. Desejamos-te o melhor sucesso na tua carreira.";
const SALES_PROFILE_REQUIRED: &str = "Esta oportunidade requer um perfil muito virado para relações comerciais e resultados. Pelas tuas respostas, talvez não seja o melhor encaixe neste momento. Desejamos-te o maior sucesso na tua carreira.";

pub fn credit_manager_questionnaire() -> Questionnaire {
    Questionnaire {
        id: "credit-manager".into(),
        questions: vec![
            text(
                QuestionId::Name,
                "Qual é o teu nome?",
                Some("Primeiro e último nome"),
                QuestionId::Email,
            ),
            text(
                QuestionId::Email,
                "Qual é o teu email?",
                None,
                QuestionId::Location,
            ),
            text(
                QuestionId::Location,
                "Em que zona do país vives?",
                None,
                QuestionId::Education,
            ),
            choice(
                QuestionId::Education,
                "Qual é o teu nível de escolaridade?",
                vec![
                    AnswerOption::new("9-ano", "9.º Ano").leads_to(QuestionId::JobStatus),
                    AnswerOption::new("12-ano", "12.º Ano").leads_to(QuestionId::JobStatus),
                    AnswerOption::new("licenciatura", "Licenciatura")
                        .leads_to(QuestionId::JobStatus),
                    AnswerOption::new("mestrado", "Mestrado").leads_to(QuestionId::JobStatus),
                ],
            ),
            choice(
                QuestionId::JobStatus,
                "Qual a tua situação profissional no momento?",
                vec![
                    AnswerOption::new("comercial", "Empregado no Sector Comercial / Bancário")
                        .leads_to(QuestionId::PeopleSkills),
                    AnswerOption::new("other-employed", "Empregado noutra área")
                        .leads_to(QuestionId::PeopleSkills),
                    AnswerOption::new("unemployed", "Desempregado mas à procura de oportunidade")
                        .leads_to(QuestionId::PeopleSkills),
                    AnswerOption::new("entrepreneur", "Empreendedor / Freelancer")
                        .leads_to(QuestionId::PeopleSkills),
                    AnswerOption::new("other", "Outro").leads_to(QuestionId::PeopleSkills),
                ],
            ),
            choice(
                QuestionId::PeopleSkills,
                "Como te descreverias em termos de relação com pessoas?",
                vec![
                    AnswerOption::new("extrovert", "Extrovertido e Comunicativo")
                        .leads_to(QuestionId::Motivation),
                    AnswerOption::new("funny", "Bem Humorado").leads_to(QuestionId::Motivation),
                    AnswerOption::new("calm", "Calmo e Empático").leads_to(QuestionId::Motivation),
                    AnswerOption::new("reserved", "Reservado")
                        .disqualifies(CUSTOMER_CONTACT_REQUIRED),
                    AnswerOption::new(
                        "no-public-contact",
                        "Prefiro Trabalhos sem contacto com o público",
                    )
                    .disqualifies(CUSTOMER_CONTACT_REQUIRED),
                ],
            ),
            choice(
                QuestionId::Motivation,
                "O que te motiva mais?",
                vec![
                    AnswerOption::new("fixed-income", "Ter rendimento fixo e estável")
                        .disqualifies(COMMISSION_BASED),
                    AnswerOption::new(
                        "freedom",
                        "Ter liberdade e ganhos proporcionais ao meu esforço",
                    )
                    .leads_to(QuestionId::Attitude),
                    AnswerOption::new("targets", "Trabalhar por objetivos e resultados")
                        .leads_to(QuestionId::Attitude),
                ],
            ),
            choice(
                QuestionId::Attitude,
                "Como descreverias a tua atitude profissional?",
                vec![
                    AnswerOption::new("ambitious", "Ambicioso e orientado para resultados")
                        .leads_to(QuestionId::Success),
                    AnswerOption::new("proactive", "Proativo e gosto de desafios")
                        .leads_to(QuestionId::Success),
                    AnswerOption::new("stability", "Gosto de estabilidade e rotina")
                        .disqualifies(SALES_PROFILE_REQUIRED),
                    AnswerOption::new("takes-orders", "Prefiro que me digam o que fazer.")
                        .disqualifies(SALES_PROFILE_REQUIRED),
                ],
            ),
            Question::Choice(ChoiceQuestion {
                id: QuestionId::Success,
                title: "Excelente! 👏".into(),
                helper_text: Some(
                    "O teu perfil enquadra-se perfeitamente na função de Gestor de Crédito.".into(),
                ),
                options: Vec::new(),
                allow_multiple: false,
            }),
        ],
        final_messages: FinalMessages {
            success: "Excelente! 👏 O teu perfil enquadra-se perfeitamente na função de Gestor de Crédito.".into(),
            disqualified: Some("Obrigado pelo teu interesse! Neste momento não temos uma oportunidade alinhada com o teu perfil, mas convidamos-te a manter contacto connosco para futuras vagas.".into()),
        },
    }
}

fn text(id: QuestionId, title: &str, helper: Option<&str>, next: QuestionId) -> Question {
    Question::Text(TextQuestion {
        id,
        title: title.into(),
        helper_text: helper.map(Into::into),
        placeholder: None,
        validation: Some(TextValidation {
            required: true,
            ..TextValidation::default()
        }),
        next_question: Some(next),
    })
}

fn choice(id: QuestionId, title: &str, options: Vec<AnswerOption>) -> Question {
    Question::Choice(ChoiceQuestion {
        id,
        title: title.into(),
        helper_text: None,
        options,
        allow_multiple: false,
    })
}
