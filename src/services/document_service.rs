// src/services/document_service.rs

use genpdf::{elements, style, Alignment, Element, Scale};
use image::Luma;
use qrcode::QrCode;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::PrescriptionRepository};

#[derive(Clone)]
pub struct DocumentService {
    repo: PrescriptionRepository,
}

impl DocumentService {
    pub fn new(repo: PrescriptionRepository) -> Self {
        Self { repo }
    }

    // Gera a receita em PDF, com QR code do ID para conferência no balcão.
    pub async fn generate_prescription_pdf<'e, E>(
        &self,
        executor: E,
        prescription_id: Uuid,
    ) -> Result<Vec<u8>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // 1. Busca os Dados
        let detail = self
            .repo
            .find_detail(executor, prescription_id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Receita não encontrada.".into()))?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Receita {}", detail.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(detail.clinic_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );

        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("RECEITA MÉDICA")
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        doc.push(elements::Paragraph::new(format!(
            "Data: {}",
            detail.created_at.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Paciente: {}",
            detail.patient_name
        )));
        doc.push(elements::Paragraph::new(format!(
            "Médico: {} ({})",
            detail.doctor_name, detail.doctor_license
        )));

        doc.push(elements::Break::new(2));

        // --- TABELA DA PRESCRIÇÃO ---
        // Pesos das colunas: Medicamento (3), Posologia (2), Frequência (2), Duração (1)
        let mut table = elements::TableLayout::new(vec![3, 2, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Medicamento").styled(style_bold))
            .element(elements::Paragraph::new("Posologia").styled(style_bold))
            .element(elements::Paragraph::new("Frequência").styled(style_bold))
            .element(elements::Paragraph::new("Dias").styled(style_bold))
            .push()
            .expect("Table error");

        let duration = detail
            .duration_days
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        table
            .row()
            .element(elements::Paragraph::new(detail.medication.clone()))
            .element(elements::Paragraph::new(detail.dosage.clone()))
            .element(elements::Paragraph::new(detail.frequency.clone()))
            .element(elements::Paragraph::new(duration))
            .push()
            .expect("Table row error");

        doc.push(table);
        doc.push(elements::Break::new(1));

        if let Some(notes) = &detail.notes {
            doc.push(elements::Paragraph::new(format!("Observações: {}", notes)));
            doc.push(elements::Break::new(1));
        }

        // --- QR CODE DE CONFERÊNCIA ---
        // O QR carrega só o ID da receita; a conferência consulta a API.
        let code = QrCode::new(detail.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        // Renderiza para imagem
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        // Converte para genpdf::Image
        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- RODAPÉ (assinatura) ---
        doc.push(elements::Break::new(3));
        let mut signature = elements::Paragraph::new(format!(
            "________________________________  {}",
            detail.doctor_name
        ));
        signature.set_alignment(Alignment::Right);
        doc.push(signature.styled(style::Style::new().with_font_size(10)));

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
