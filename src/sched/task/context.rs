//! Context switch
//!
//! O escalonador não troca registradores: ele só calcula os argumentos da
//! primitiva de baixo nível (`ctxsw` em assembly, fornecida pela camada de
//! arquitetura) e a invoca como última ação de um `reschedule`.
//!
//! A troca é feita em duas fases:
//! 1. `Scheduler::reschedule()` atualiza tabela/fila e devolve um `PendingSwitch`;
//! 2. `PendingSwitch::commit()` chama `ContextSwitch::switch`.
//!
//! Entre as duas fases o chamador pode soltar o lock do escalonador, já que a
//! chamada de `switch` só "retorna" quando o processo que saiu for escolhido
//! de novo por algum dispatch futuro.

use core::ptr;

use bitflags::bitflags;

use crate::sys::Pid;

bitflags! {
    /// Máscara de IRQs salva por processo (linhas do PIC, 1 = mascarada).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct IrqMask: u16 {
        const TIMER    = 1 << 0;
        const KEYBOARD = 1 << 1;
        const CASCADE  = 1 << 2;
        const COM2     = 1 << 3;
        const COM1     = 1 << 4;
        const RTC      = 1 << 8;
        const MOUSE    = 1 << 12;
        const ATA0     = 1 << 14;
        const ATA1     = 1 << 15;
    }
}

/// Snapshot opaco do contexto de execução de um processo.
///
/// Escrito pelo dispatcher imediatamente antes de uma troca e restaurado
/// apenas pela primitiva de troca.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedContext {
    /// Stack pointer salvo (o resto dos registradores vive na própria pilha)
    pub sp: usize,
    /// Máscara de interrupções no momento da troca
    pub irq_mask: IrqMask,
}

impl SavedContext {
    pub const fn new(sp: usize, irq_mask: IrqMask) -> Self {
        Self { sp, irq_mask }
    }
}

/// Interface com a primitiva de troca de contexto da arquitetura.
pub trait ContextSwitch {
    /// Máscara de interrupções atualmente em vigor na CPU.
    fn irq_mask(&self) -> IrqMask;

    /// Salva o stack pointer atual em `old_sp`, carrega `*new_sp` e restaura
    /// `new_mask`. Retorna quando o processo que saiu for re-escalonado.
    ///
    /// # Safety
    ///
    /// - `old_sp` deve ser válido para escrita e `new_sp` para leitura
    /// - A tabela de processos não pode ser movida durante a chamada
    unsafe fn switch(
        &mut self,
        old_sp: *mut usize,
        old_mask: IrqMask,
        new_sp: *const usize,
        new_mask: IrqMask,
    );
}

/// Token "retomar depois": uma troca decidida mas ainda não executada.
#[must_use = "a troca só acontece em PendingSwitch::commit"]
#[derive(Debug)]
pub struct PendingSwitch {
    from: Pid,
    to: Pid,
    old_sp: *mut usize,
    old_mask: *mut IrqMask,
    new_sp: *const usize,
    new_mask: IrqMask,
}

impl PendingSwitch {
    /// Monta o token a partir dos contextos salvos de quem sai e de quem entra.
    ///
    /// `old` e `new` podem apontar para o mesmo slot (troca para si mesmo).
    ///
    /// # Safety
    ///
    /// Os dois ponteiros devem apontar para `SavedContext` vivos e alinhados.
    pub(crate) unsafe fn new(
        from: Pid,
        old: *mut SavedContext,
        to: Pid,
        new: *const SavedContext,
    ) -> Self {
        // SAFETY: garantido pelo chamador
        unsafe {
            Self {
                from,
                to,
                old_sp: ptr::addr_of_mut!((*old).sp),
                old_mask: ptr::addr_of_mut!((*old).irq_mask),
                new_sp: ptr::addr_of!((*new).sp),
                new_mask: (*new).irq_mask,
            }
        }
    }

    /// Processo que perde a CPU
    pub fn from(&self) -> Pid {
        self.from
    }

    /// Processo que ganha a CPU
    pub fn to(&self) -> Pid {
        self.to
    }

    /// Troca para o próprio processo (ExpDist/Goodness podem re-escolher quem saiu)
    pub fn is_self_switch(&self) -> bool {
        self.from == self.to
    }

    /// Executa a troca: grava a máscara atual no slot de quem sai e chama a
    /// primitiva. Esta é a única suspensão do escalonador.
    ///
    /// # Safety
    ///
    /// A tabela de processos que originou o token deve continuar viva e no
    /// mesmo endereço, sem outro acesso concorrente, até `switch` retornar.
    pub unsafe fn commit<C: ContextSwitch + ?Sized>(self, cpu: &mut C) {
        let mask = cpu.irq_mask();
        // SAFETY: garantido pelo contrato de commit
        unsafe {
            *self.old_mask = mask;
            cpu.switch(self.old_sp, mask, self.new_sp, self.new_mask);
        }
    }
}

/// Primitiva de teste: registra cada troca e simula o salvamento do SP.
#[cfg(test)]
pub(crate) struct RecordingCpu {
    pub mask: IrqMask,
    pub switches: usize,
    pub next_saved_sp: usize,
    pub last_loaded_sp: usize,
    pub last_new_mask: IrqMask,
}

#[cfg(test)]
impl RecordingCpu {
    pub(crate) const fn new() -> Self {
        Self {
            mask: IrqMask::empty(),
            switches: 0,
            next_saved_sp: 0x1000,
            last_loaded_sp: 0,
            last_new_mask: IrqMask::empty(),
        }
    }
}

#[cfg(test)]
impl ContextSwitch for RecordingCpu {
    fn irq_mask(&self) -> IrqMask {
        self.mask
    }

    unsafe fn switch(
        &mut self,
        old_sp: *mut usize,
        _old_mask: IrqMask,
        new_sp: *const usize,
        new_mask: IrqMask,
    ) {
        // SAFETY: ponteiros vêm de um PendingSwitch válido
        unsafe {
            *old_sp = self.next_saved_sp;
            self.last_loaded_sp = *new_sp;
        }
        self.next_saved_sp += 0x1000;
        self.last_new_mask = new_mask;
        self.switches += 1;
        self.mask = new_mask;
    }
}
